// ==========================================
// 客户数据导入 - 客户领域模型
// ==========================================
// CustomerRecord: CSV 单行的原始字段（落库前）
// Customer: customers 表实体（email 唯一）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 超长地址的替代值
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// 地址最大长度（字符数）
pub const MAX_LOCATION_LEN: usize = 255;

// CSV 固定列位置
pub const NAME_COLUMN_NUM: usize = 0;
pub const SURNAME_COLUMN_NUM: usize = 1;
pub const EMAIL_COLUMN_NUM: usize = 2;
pub const AGE_COLUMN_NUM: usize = 3;
pub const LOCATION_COLUMN_NUM: usize = 4;
pub const COUNTRY_CODE_COLUMN_NUM: usize = 5;

// ==========================================
// CustomerRecord - 导入记录
// ==========================================
// 用途: 校验输入 + 错误报表行
// 说明: 字段保持原始文本；缺失列按空串处理，由必填校验报出
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub age: String,
    pub location: String,
    pub country_code: String,
    pub error_column: Option<String>, // 未通过校验的字段（", " 连接）
}

impl CustomerRecord {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        age: impl Into<String>,
        location: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
            age: age.into(),
            location: location.into(),
            country_code: country_code.into(),
            error_column: None,
        }
    }

    /// 按固定列位置构造记录
    ///
    /// 列数不足时缺失字段为空串（不做越界访问）
    pub fn from_csv_row(row: &[String]) -> Self {
        let column = |idx: usize| row.get(idx).cloned().unwrap_or_default();

        Self::new(
            column(NAME_COLUMN_NUM),
            column(SURNAME_COLUMN_NUM),
            column(EMAIL_COLUMN_NUM),
            column(AGE_COLUMN_NUM),
            column(LOCATION_COLUMN_NUM),
            column(COUNTRY_CODE_COLUMN_NUM),
        )
    }

    /// 地址超长时替换为 "Unknown"
    ///
    /// # 返回
    /// - true: 发生了替换
    pub fn normalize_location(&mut self) -> bool {
        if self.location.chars().count() > MAX_LOCATION_LEN {
            self.location = UNKNOWN_LOCATION.to_string();
            return true;
        }
        false
    }

    /// 转换为落库属性（age 无法解析时返回 None）
    pub fn to_attributes(&self) -> Option<CustomerAttributes> {
        Some(CustomerAttributes {
            name: self.name.clone(),
            surname: self.surname.clone(),
            age: parse_age(&self.age)?,
            location: self.location.clone(),
            country_code: self.country_code.clone(),
        })
    }

    /// 错误报表行: 6 个原始字段 + 错误说明
    pub fn to_report_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.surname.clone(),
            self.email.clone(),
            self.age.clone(),
            self.location.clone(),
            self.country_code.clone(),
            self.error_column.clone().unwrap_or_default(),
        ]
    }
}

/// 解析整数年龄
///
/// 规则: 允许首尾空白与正负号；拒绝小数、前导零（"0" 除外）
pub fn parse_age(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }

    trimmed.parse::<i64>().ok()
}

// ==========================================
// CustomerAttributes - 落库属性（不含主键 email）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAttributes {
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub location: String,
    pub country_code: String,
}

// ==========================================
// Customer - 客户实体
// ==========================================
// 对齐: customers 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub age: i64,
    pub location: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// UpsertOutcome - 按邮箱写入的结果
// ==========================================
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub customer: Customer,
    pub was_created: bool, // true: 新建; false: 覆盖已有记录
}
