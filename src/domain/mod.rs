// ==========================================
// 客户数据导入 - 领域模型层
// ==========================================
// 职责: 定义导入记录、落库实体、导入结果
// 红线: 不含数据访问逻辑,不含校验逻辑
// ==========================================

pub mod customer;
pub mod import;

// 重导出核心类型
pub use customer::{Customer, CustomerAttributes, CustomerRecord, UpsertOutcome};
pub use import::{ImportRunResult, ImportSummary};
