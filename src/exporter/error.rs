// ==========================================
// 客户数据导入 - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("报表目录创建失败 ({path}): {message}")]
    DirectoryError { path: String, message: String },

    #[error("无效的列名: {0}")]
    InvalidColumn(String),

    #[error("单元格写入失败 ({cell}): {message}")]
    CellWriteError { cell: String, message: String },

    #[error("报表保存失败: {0}")]
    SaveError(String),
}

// 实现 From<rust_xlsxwriter::XlsxError>
impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::SaveError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
