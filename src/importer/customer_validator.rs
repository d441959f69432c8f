// ==========================================
// 客户数据导入 - 客户记录校验器
// ==========================================
// 规则（各字段独立校验，不短路）:
// - name:         必填, ≤255 字符
// - surname:      必填, ≤255 字符
// - email:        必填, ≤255 字符, 邮箱格式, 域名可解析
// - age:          必填, 整数, 18..=99
// - country_code: 必填, ≤3 字符
// location 不参与校验（超长由 CustomerRecord::normalize_location 替换）
// ==========================================

use crate::domain::customer::{parse_age, CustomerRecord};
use crate::importer::customer_importer_trait::{CustomerValidator, EmailDomainChecker};
use crate::importer::domain_checker::DnsDomainChecker;
use crate::importer::error::ImportResult;
use validator::ValidateEmail;

pub const NAME_FIELD: &str = "name";
pub const SURNAME_FIELD: &str = "surname";
pub const EMAIL_FIELD: &str = "email";
pub const AGE_FIELD: &str = "age";
pub const COUNTRY_CODE_FIELD: &str = "country_code";

/// 字符串字段最大长度
pub const MAX_STRING_LEN: usize = 255;

/// 国家代码最大长度
pub const MAX_COUNTRY_CODE_LEN: usize = 3;

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 99;

/// 错误字段分隔符
pub const ERROR_SEPARATOR: &str = ", ";

/// 拼接错误字段（无错误时返回 None）
pub fn error_column(failed_fields: &[&str]) -> Option<String> {
    if failed_fields.is_empty() {
        None
    } else {
        Some(failed_fields.join(ERROR_SEPARATOR))
    }
}

fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn within_len(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

// ==========================================
// CustomerValidatorImpl
// ==========================================
pub struct CustomerValidatorImpl {
    domain_checker: Box<dyn EmailDomainChecker>,
}

impl CustomerValidatorImpl {
    pub fn new(domain_checker: Box<dyn EmailDomainChecker>) -> Self {
        Self { domain_checker }
    }

    /// 使用系统 DNS 配置（MX 优先，A/AAAA 回退）
    pub fn with_system_resolver() -> ImportResult<Self> {
        Ok(Self::new(Box::new(DnsDomainChecker::from_system_conf()?)))
    }

    fn validate_required_string(value: &str, max: usize) -> bool {
        is_present(value) && within_len(value, max)
    }

    fn validate_email(&self, value: &str) -> bool {
        if !Self::validate_required_string(value, MAX_STRING_LEN) || !value.validate_email() {
            return false;
        }

        match value.rsplit_once('@') {
            Some((_, domain)) => self.domain_checker.has_mail_domain(domain),
            None => false,
        }
    }

    fn validate_age(value: &str) -> bool {
        matches!(parse_age(value), Some(age) if (MIN_AGE..=MAX_AGE).contains(&age))
    }
}

impl CustomerValidator for CustomerValidatorImpl {
    fn validate(&self, record: &CustomerRecord) -> Vec<&'static str> {
        let mut failed = Vec::new();

        if !Self::validate_required_string(&record.name, MAX_STRING_LEN) {
            failed.push(NAME_FIELD);
        }
        if !Self::validate_required_string(&record.surname, MAX_STRING_LEN) {
            failed.push(SURNAME_FIELD);
        }
        if !self.validate_email(&record.email) {
            failed.push(EMAIL_FIELD);
        }
        if !Self::validate_age(&record.age) {
            failed.push(AGE_FIELD);
        }
        if !Self::validate_required_string(&record.country_code, MAX_COUNTRY_CODE_LEN) {
            failed.push(COUNTRY_CODE_FIELD);
        }

        failed
    }
}
