// ==========================================
// 客户数据导入 - 存储路径配置
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 环境变量键
pub mod env_keys {
    pub const STORAGE_PATH: &str = "CUSTOMER_IMPORT_STORAGE_PATH";
    pub const DB_PATH: &str = "CUSTOMER_IMPORT_DB_PATH";
    pub const LOCALE: &str = "CUSTOMER_IMPORT_LOCALE";
}

/// 相对存储根目录的 CSV 源文件
pub const DEFAULT_FILE_PATH: &str = "imports/customers/file.csv";

/// 相对存储根目录的错误报表目录
pub const DEFAULT_ERRORS_DIR: &str = "imports/customers/errors";

/// 错误报表文件名（固定）
pub const ERRORS_FILE_NAME: &str = "errors.xls";

/// 默认数据库文件名
pub const DEFAULT_DB_FILE_NAME: &str = "customers.db";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// StorageConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub storage_path: PathBuf, // 存储根目录
    pub file_path: PathBuf,    // CSV 源文件
    pub errors_dir: PathBuf,   // 错误报表目录
    pub db_path: PathBuf,      // SQLite 数据库
    pub locale: String,        // 输出语言
}

impl StorageConfig {
    /// 以给定根目录构造默认布局
    pub fn from_storage_path<P: AsRef<Path>>(storage_path: P) -> Self {
        let storage_path = storage_path.as_ref().to_path_buf();
        Self {
            file_path: storage_path.join(DEFAULT_FILE_PATH),
            errors_dir: storage_path.join(DEFAULT_ERRORS_DIR),
            db_path: storage_path.join(DEFAULT_DB_FILE_NAME),
            locale: DEFAULT_LOCALE.to_string(),
            storage_path,
        }
    }

    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（空白值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let storage_path = read(env_keys::STORAGE_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_path);

        let mut config = Self::from_storage_path(storage_path);
        if let Some(db_path) = read(env_keys::DB_PATH) {
            config.db_path = PathBuf::from(db_path);
        }
        if let Some(locale) = read(env_keys::LOCALE) {
            config.locale = locale;
        }
        config
    }

    /// 错误报表完整路径
    pub fn errors_file_path(&self) -> PathBuf {
        self.errors_dir.join(ERRORS_FILE_NAME)
    }
}

/// 默认存储根目录
///
/// 用户数据目录/customer-import；取不到时回退到 ./storage
fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(crate::APP_NAME))
        .unwrap_or_else(|| PathBuf::from("./storage"))
}
