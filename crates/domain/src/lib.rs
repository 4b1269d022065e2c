//! # Meibo ドメイン層
//!
//! 社員名簿のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`employee::Employee`],
//!   [`role::Role`]）
//! - **識別子**: DB のシーケンスで採番される整数 ID を newtype で包む
//! - I/O やフレームワークへの依存を持たない
//!
//! ## 依存関係の方向
//!
//! ```text
//! employee-api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。

pub mod employee;
pub mod role;
