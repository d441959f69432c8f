// ==========================================
// 客户数据导入 - 配置层
// ==========================================
// 职责: 存储根目录及其派生路径（CSV 源文件、错误报表目录、数据库）
// 来源: 环境变量 > 用户数据目录 > ./storage
// ==========================================

pub mod storage_config;

pub use storage_config::{env_keys, StorageConfig};
