// ==========================================
// 客户数据导入 - 邮箱域名检查
// ==========================================
// 规则:
// - 单标签域名、保留顶级域（RFC 2606 / RFC 6761）直接拒绝，不发查询
// - 有 MX 记录: 至少一条非 Null MX（RFC 7505）即通过
// - 无 MX 记录: 回退检查 A/AAAA（RFC 5321 隐式 MX）
// - 同一域名只查询一次
// ==========================================

use crate::importer::customer_importer_trait::{EmailDomainChecker, MailRecordLookup};
use crate::importer::error::{ImportError, ImportResult};
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::Resolver;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// 单次 DNS 查询超时
pub const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// 每个查询的重试次数
pub const DNS_ATTEMPTS: usize = 2;

const RESERVED_TLDS: [&str; 6] = ["test", "example", "invalid", "localhost", "local", "onion"];

// ==========================================
// HickoryLookup - hickory-resolver 查询后端
// ==========================================
pub struct HickoryLookup {
    resolver: Resolver,
}

impl HickoryLookup {
    /// 读取系统 DNS 配置（/etc/resolv.conf 等），覆盖超时与重试次数
    pub fn from_system_conf() -> ImportResult<Self> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| ImportError::Config(format!("读取系统 DNS 配置失败: {}", e)))?;
        Self::with_config(config, opts)
    }

    pub fn with_config(config: ResolverConfig, mut opts: ResolverOpts) -> ImportResult<Self> {
        opts.timeout = DNS_TIMEOUT;
        opts.attempts = DNS_ATTEMPTS;

        let resolver = Resolver::new(config, opts)
            .map_err(|e| ImportError::Config(format!("DNS 解析器初始化失败: {}", e)))?;
        info!(timeout_secs = DNS_TIMEOUT.as_secs(), attempts = DNS_ATTEMPTS, "DNS 解析器就绪");
        Ok(Self { resolver })
    }

    // 末尾加点，避免套用 search 域
    fn fqdn(domain: &str) -> String {
        format!("{}.", domain)
    }
}

impl MailRecordLookup for HickoryLookup {
    fn mx_exchanges(&self, domain: &str) -> Vec<String> {
        match self.resolver.mx_lookup(Self::fqdn(domain).as_str()) {
            Ok(lookup) => lookup
                .iter()
                .map(|mx| mx.exchange().to_utf8().trim_end_matches('.').to_string())
                .collect(),
            Err(e) => {
                debug!(domain = %domain, error = %e, "MX 查询无结果");
                Vec::new()
            }
        }
    }

    fn has_address(&self, domain: &str) -> bool {
        match self.resolver.lookup_ip(Self::fqdn(domain).as_str()) {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!(domain = %domain, error = %e, "A/AAAA 查询无结果");
                false
            }
        }
    }
}

// ==========================================
// DnsDomainChecker
// ==========================================
pub struct DnsDomainChecker {
    lookup: Box<dyn MailRecordLookup>,
    cache: Mutex<HashMap<String, bool>>,
}

impl DnsDomainChecker {
    pub fn new(lookup: Box<dyn MailRecordLookup>) -> Self {
        Self {
            lookup,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_system_conf() -> ImportResult<Self> {
        Ok(Self::new(Box::new(HickoryLookup::from_system_conf()?)))
    }

    fn is_reserved(domain: &str) -> bool {
        match domain.rsplit_once('.') {
            Some((_, tld)) => RESERVED_TLDS.contains(&tld),
            None => true,
        }
    }

    fn resolve(&self, domain: &str) -> bool {
        let exchanges = self.lookup.mx_exchanges(domain);
        if !exchanges.is_empty() {
            return exchanges.iter().any(|host| !host.is_empty());
        }
        self.lookup.has_address(domain)
    }
}

impl EmailDomainChecker for DnsDomainChecker {
    fn has_mail_domain(&self, domain: &str) -> bool {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if domain.is_empty() || Self::is_reserved(&domain) {
            return false;
        }

        if let Ok(cache) = self.cache.lock() {
            if let Some(resolved) = cache.get(&domain) {
                return *resolved;
            }
        }

        let resolved = self.resolve(&domain);
        debug!(domain = %domain, resolved, "邮箱域名检查");

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(domain, resolved);
        }
        resolved
    }
}
