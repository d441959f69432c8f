// ==========================================
// 客户数据导入 - 导入层
// ==========================================
// 职责: CSV 读取、逐行校验、按邮箱落库、错误收集
// ==========================================

// 模块声明
pub mod customer_importer_impl;
pub mod customer_importer_trait;
pub mod customer_validator;
pub mod domain_checker;
pub mod error;
pub mod file_parser;

// 重导出核心类型
pub use customer_importer_impl::{error_report_title, summary_lines, CustomerImporterImpl};
pub use customer_validator::{error_column, CustomerValidatorImpl};
pub use domain_checker::{DnsDomainChecker, HickoryLookup};
pub use error::{ImportError, ImportResult};
pub use file_parser::CsvParser;

// 重导出 Trait 接口
pub use customer_importer_trait::{
    CustomerImporter, CustomerValidator, EmailDomainChecker, FileParser, MailRecordLookup,
};
