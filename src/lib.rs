// ==========================================
// 客户数据导入 - 核心库
// ==========================================
// 流程: CSV 解析 → 逐行校验/规范化 → 按邮箱落库 → 错误汇总 → 错误报表
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 错误报表
pub mod exporter;

// 配置层 - 存储路径
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Customer, CustomerAttributes, CustomerRecord, ImportRunResult, ImportSummary, UpsertOutcome,
};
pub use exporter::{ExcelReportWriter, ReportWriter};
pub use importer::{
    CsvParser, CustomerImporter, CustomerImporterImpl, CustomerValidatorImpl, DnsDomainChecker,
    ImportError, ImportResult,
};
pub use repository::{CustomerRepository, CustomerRepositoryImpl};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "customer-import";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
