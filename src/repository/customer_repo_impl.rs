// ==========================================
// 客户数据导入 - 客户仓储实现
// ==========================================
// 职责: customers 表数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{open_in_memory_connection, open_sqlite_connection};
use crate::domain::customer::{Customer, CustomerAttributes, UpsertOutcome};
use crate::repository::customer_repo::CustomerRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, name, surname, age, location, country_code, created_at, updated_at
    FROM customers
"#;

// ==========================================
// CustomerRepositoryImpl
// ==========================================
pub struct CustomerRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl CustomerRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new<P: AsRef<Path>>(db_path: P) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 内存库实例
    pub fn in_memory() -> RepositoryResult<Self> {
        let conn = open_in_memory_connection()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_table()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 确保表存在（如果不存在则创建）
    fn ensure_table(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS customers (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              email TEXT NOT NULL UNIQUE,
              name TEXT NOT NULL,
              surname TEXT NOT NULL,
              age INTEGER NOT NULL,
              location TEXT NOT NULL,
              country_code TEXT NOT NULL,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
        Ok(Customer {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            surname: row.get(3)?,
            age: row.get(4)?,
            location: row.get(5)?,
            country_code: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn find_by_email_with(conn: &Connection, email: &str) -> RepositoryResult<Option<Customer>> {
        let sql = format!("{} WHERE email = ?1", SELECT_COLUMNS);
        let customer = conn
            .query_row(&sql, params![email], Self::map_row)
            .optional()?;
        Ok(customer)
    }
}

impl CustomerRepository for CustomerRepositoryImpl {
    /// 按 email 新建或更新（单条事务）
    fn upsert_by_email(
        &self,
        email: &str,
        attributes: &CustomerAttributes,
    ) -> RepositoryResult<UpsertOutcome> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let now = Utc::now();
        let existing_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM customers WHERE email = ?1",
                params![email],
                |row| row.get(0),
            )
            .optional()?;

        let was_created = match existing_id {
            Some(id) => {
                tx.execute(
                    r#"
                    UPDATE customers
                    SET name = ?1, surname = ?2, age = ?3, location = ?4,
                        country_code = ?5, updated_at = ?6
                    WHERE id = ?7
                    "#,
                    params![
                        attributes.name,
                        attributes.surname,
                        attributes.age,
                        attributes.location,
                        attributes.country_code,
                        now,
                        id,
                    ],
                )?;
                false
            }
            None => {
                tx.execute(
                    r#"
                    INSERT INTO customers (
                        email, name, surname, age, location, country_code,
                        created_at, updated_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        email,
                        attributes.name,
                        attributes.surname,
                        attributes.age,
                        attributes.location,
                        attributes.country_code,
                        now,
                        now,
                    ],
                )?;
                true
            }
        };

        let customer =
            Self::find_by_email_with(&tx, email)?.ok_or_else(|| RepositoryError::NotFound {
                entity: "customers".to_string(),
                key: email.to_string(),
            })?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(email = %email, was_created, customer_id = customer.id, "客户写入完成");
        Ok(UpsertOutcome {
            customer,
            was_created,
        })
    }

    fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Customer>> {
        let conn = self.get_conn()?;
        Self::find_by_email_with(&conn, email)
    }

    fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM customers", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn list_all(&self) -> RepositoryResult<Vec<Customer>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let customers = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(customers)
    }
}
