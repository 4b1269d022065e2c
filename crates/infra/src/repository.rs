//! # リポジトリ実装
//!
//! 各集約のリポジトリトレイトと、その PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: 上位層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod employee_repository;
pub mod role_repository;

pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
pub use role_repository::{PostgresRoleRepository, RoleRepository};
