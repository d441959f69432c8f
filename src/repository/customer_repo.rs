// ==========================================
// 客户数据导入 - 客户仓储 Trait
// ==========================================
// 职责: 定义导入所需的客户存储接口（不包含实现）
// ==========================================

use crate::domain::customer::{Customer, CustomerAttributes, UpsertOutcome};
use crate::repository::error::RepositoryResult;

// ==========================================
// CustomerRepository Trait
// ==========================================
// 用途: 按 email 唯一键写入客户
// 实现者: CustomerRepositoryImpl
pub trait CustomerRepository: Send + Sync {
    /// 按 email 新建或更新客户
    ///
    /// # 保证
    /// - 调用后该 email 恰有一条记录
    /// - 已存在: 用 attributes 覆盖，was_created = false
    /// - 不存在: 插入新记录，was_created = true
    fn upsert_by_email(
        &self,
        email: &str,
        attributes: &CustomerAttributes,
    ) -> RepositoryResult<UpsertOutcome>;

    /// 按 email 查找
    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>>;

    /// 客户总数
    fn count(&self) -> RepositoryResult<usize>;

    /// 全部客户（按 id 升序）
    fn list_all(&self) -> RepositoryResult<Vec<Customer>>;
}
