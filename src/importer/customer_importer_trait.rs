// ==========================================
// 客户数据导入 - 导入 Trait
// ==========================================
// 职责: 定义导入流程各环节接口（不包含实现）
// ==========================================

use crate::domain::customer::CustomerRecord;
use crate::domain::import::ImportRunResult;
use crate::importer::error::ImportResult;
use std::io::Write;
use std::path::Path;

// ==========================================
// CustomerImporter Trait
// ==========================================
// 用途: 客户导入主接口
// 实现者: CustomerImporterImpl
pub trait CustomerImporter {
    /// 按配置路径导入客户
    ///
    /// # 参数
    /// - output: 汇总输出（新建/更新/校验失败数量，数量为 0 的行省略）
    ///
    /// # 返回
    /// - Ok(ImportRunResult): 导入结果
    /// - Err: 文件读取失败、落库失败、报表写出失败
    ///
    /// # 导入流程
    /// 1. 读取 CSV 全部数据行
    /// 2. 逐行构造记录、规范化地址、校验
    /// 3. 有效行按 email 落库，无效行收集
    /// 4. 输出汇总
    /// 5. 存在无效行时写出错误报表
    fn import(&self, output: &mut dyn Write) -> ImportResult<ImportRunResult>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为数据行（不含表头），每行为原始字段列表
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<Vec<String>>>;
}

// ==========================================
// CustomerValidator Trait
// ==========================================
// 实现者: CustomerValidatorImpl
pub trait CustomerValidator: Send + Sync {
    /// 返回未通过校验的字段名（按规则声明顺序）；全部通过时为空
    fn validate(&self, record: &CustomerRecord) -> Vec<&'static str>;
}

// ==========================================
// EmailDomainChecker Trait
// ==========================================
// 用途: 邮箱域名可投递性检查（外部 DNS 依赖，测试中可替换）
// 实现者: DnsDomainChecker
pub trait EmailDomainChecker: Send + Sync {
    fn has_mail_domain(&self, domain: &str) -> bool;
}

// ==========================================
// MailRecordLookup Trait
// ==========================================
// 用途: DnsDomainChecker 的 DNS 查询后端
// 实现者: HickoryLookup
pub trait MailRecordLookup: Send + Sync {
    /// 查询 MX 交换主机（去掉末尾的点；Null MX 为空串）
    ///
    /// 无记录或查询失败时返回空列表
    fn mx_exchanges(&self, domain: &str) -> Vec<String>;

    /// 是否存在 A/AAAA 记录
    fn has_address(&self, domain: &str) -> bool;
}
