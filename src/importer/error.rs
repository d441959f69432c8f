// ==========================================
// 客户数据导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单行校验失败不是错误（写入 CustomerRecord.error_column）
//       这里只列出会中止整次导入的错误
// ==========================================

use crate::exporter::ExportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件读取失败: {0}")]
    ReadFileError(String),

    // ===== 报表错误 =====
    #[error("错误报表写出失败: {0}")]
    ReportWriteError(#[from] ExportError),

    // ===== 输出错误 =====
    #[error("汇总输出失败: {0}")]
    OutputError(String),

    // ===== 配置错误 =====
    #[error("配置错误: {0}")]
    Config(String),

    // ===== 数据库错误 =====
    #[error("客户落库失败: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message() {
        let err = ImportError::Config("读取系统 DNS 配置失败: no nameservers".to_string());
        assert_eq!(err.to_string(), "配置错误: 读取系统 DNS 配置失败: no nameservers");
    }
}
