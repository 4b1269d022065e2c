//! # RoleRepository
//!
//! ロール情報の取得を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **EmployeeRepository との分離**: SRP に基づき、ロールの参照は
//!   独立トレイトで定義
//! - **読み取り専用**: ロールの作成・更新・削除はこのシステムの管轄外

use async_trait::async_trait;
use meibo_domain::role::{Role, RoleId};
use sqlx::PgPool;

use crate::error::InfraError;

/// ロールリポジトリトレイト
///
/// ロールの参照操作のみを定義する。
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// 全ロールを取得する
    async fn find_all(&self) -> Result<Vec<Role>, InfraError>;
}

/// PostgreSQL 実装の RoleRepository
#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// roles テーブルの行
#[derive(sqlx::FromRow)]
struct RoleRow {
    role_id:   i32,
    role_name: String,
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_all(&self) -> Result<Vec<Role>, InfraError> {
        let rows = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT role_id, role_name
            FROM roles
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Role::from_db(RoleId::from_i32(row.role_id), row.role_name))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresRoleRepository>();
    }
}
