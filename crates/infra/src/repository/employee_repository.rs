//! # EmployeeRepository
//!
//! 社員情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **RoleRepository との分離**: ロールの参照は独立トレイトで定義。
//!   ただしロール名を含む射影（LEFT JOIN）はこのリポジトリが担当する
//! - **並び順**: 一覧系クエリは社員 ID の降順（新しい順）を返す
//! - **部分一致検索**: `LIKE` による部分一致。大文字小文字の扱いは
//!   ストレージ側の照合順序に従い、この層では強制しない

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meibo_domain::{
    employee::{Employee, EmployeeId, NewEmployee},
    role::RoleId,
};
use sqlx::PgPool;

use crate::error::InfraError;

/// 社員リポジトリトレイト
///
/// 社員の CRUD 操作と、ロール名を含む射影の取得を定義する。
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// 社員を挿入し、採番された ID を返す
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError>;

    /// ID で社員を検索する
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;

    /// ID で社員をロール名付きで検索する
    ///
    /// ロール未割り当て（または対応するロールが存在しない）場合、
    /// ロール名は `None` になる。
    async fn find_with_role_name(
        &self,
        id: EmployeeId,
    ) -> Result<Option<(Employee, Option<String>)>, InfraError>;

    /// 全社員をロール名付きで取得する（社員 ID 降順）
    async fn find_all_with_role_names(
        &self,
    ) -> Result<Vec<(Employee, Option<String>)>, InfraError>;

    /// 名または姓に部分一致する社員を取得する（社員 ID 降順）
    ///
    /// 空文字列は全社員に一致する。
    async fn search_by_name(&self, term: &str) -> Result<Vec<Employee>, InfraError>;

    /// 社員を更新する（ID 以外の全フィールド）
    async fn update(&self, employee: &Employee) -> Result<(), InfraError>;

    /// 社員を削除する
    async fn delete(&self, id: EmployeeId) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// employees テーブルの行
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    employee_id:     i64,
    employee_number: i32,
    first_name:      String,
    last_name:       String,
    date_joined:     DateTime<Utc>,
    extension:       Option<i16>,
    role_id:         Option<i32>,
}

impl EmployeeRow {
    fn into_employee(self) -> Employee {
        Employee::from_db(
            EmployeeId::from_i64(self.employee_id),
            NewEmployee {
                employee_number: self.employee_number,
                first_name:      self.first_name,
                last_name:       self.last_name,
                date_joined:     self.date_joined,
                extension:       self.extension,
                role_id:         self.role_id.map(RoleId::from_i32),
            },
        )
    }
}

/// employees と roles を LEFT JOIN した行
#[derive(sqlx::FromRow)]
struct EmployeeWithRoleRow {
    employee_id:     i64,
    employee_number: i32,
    first_name:      String,
    last_name:       String,
    date_joined:     DateTime<Utc>,
    extension:       Option<i16>,
    role_id:         Option<i32>,
    role_name:       Option<String>,
}

impl EmployeeWithRoleRow {
    fn into_parts(self) -> (Employee, Option<String>) {
        let employee = Employee::from_db(
            EmployeeId::from_i64(self.employee_id),
            NewEmployee {
                employee_number: self.employee_number,
                first_name:      self.first_name,
                last_name:       self.last_name,
                date_joined:     self.date_joined,
                extension:       self.extension,
                role_id:         self.role_id.map(RoleId::from_i32),
            },
        );
        (employee, self.role_name)
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn insert(&self, employee: &NewEmployee) -> Result<EmployeeId, InfraError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO employees (employee_number, first_name, last_name, date_joined, extension, role_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING employee_id
            "#,
        )
        .bind(employee.employee_number)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.date_joined)
        .bind(employee.extension)
        .bind(employee.role_id.map(|r| r.as_i32()))
        .fetch_one(&self.pool)
        .await?;

        Ok(EmployeeId::from_i64(id))
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_id, employee_number, first_name, last_name,
                   date_joined, extension, role_id
            FROM employees
            WHERE employee_id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeRow::into_employee))
    }

    async fn find_with_role_name(
        &self,
        id: EmployeeId,
    ) -> Result<Option<(Employee, Option<String>)>, InfraError> {
        let row = sqlx::query_as::<_, EmployeeWithRoleRow>(
            r#"
            SELECT e.employee_id, e.employee_number, e.first_name, e.last_name,
                   e.date_joined, e.extension, e.role_id, r.role_name
            FROM employees e
            LEFT JOIN roles r ON r.role_id = e.role_id
            WHERE e.employee_id = $1
            ORDER BY e.employee_id DESC
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmployeeWithRoleRow::into_parts))
    }

    async fn find_all_with_role_names(
        &self,
    ) -> Result<Vec<(Employee, Option<String>)>, InfraError> {
        let rows = sqlx::query_as::<_, EmployeeWithRoleRow>(
            r#"
            SELECT e.employee_id, e.employee_number, e.first_name, e.last_name,
                   e.date_joined, e.extension, e.role_id, r.role_name
            FROM employees e
            LEFT JOIN roles r ON r.role_id = e.role_id
            ORDER BY e.employee_id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(EmployeeWithRoleRow::into_parts)
            .collect())
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<Employee>, InfraError> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT employee_id, employee_number, first_name, last_name,
                   date_joined, extension, role_id
            FROM employees
            WHERE first_name LIKE '%' || $1 || '%'
               OR last_name LIKE '%' || $1 || '%'
            ORDER BY employee_id DESC
            "#,
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(EmployeeRow::into_employee).collect())
    }

    async fn update(&self, employee: &Employee) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE employees
            SET employee_number = $2, first_name = $3, last_name = $4,
                date_joined = $5, extension = $6, role_id = $7
            WHERE employee_id = $1
            "#,
        )
        .bind(employee.id().as_i64())
        .bind(employee.employee_number())
        .bind(employee.first_name())
        .bind(employee.last_name())
        .bind(employee.date_joined())
        .bind(employee.extension())
        .bind(employee.role_id().map(|r| r.as_i32()))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            DELETE FROM employees
            WHERE employee_id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresEmployeeRepository>();
    }
}
