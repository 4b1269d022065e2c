//! # ユースケース層
//!
//! ハンドラから委譲される操作のロジックを実装する。
//! 各操作は単一のストレージ作業単位として独立にトランザクショナルであり、
//! 操作間の順序保証は持たない。

pub mod employee;

pub use employee::{EmployeeUseCaseImpl, UpdateEmployeeInput};
