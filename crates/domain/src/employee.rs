//! # 社員エンティティ
//!
//! 社員名簿の中心となるエンティティ。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmployeeId`] | 社員 ID | DB が採番するサロゲートキー |
//! | 社員番号 | `employee_number` | 業務上の識別子。この層では一意性を保証しない |
//! | [`NewEmployee`] | 登録・更新パラメータ | 可変フィールドの一括指定 |
//!
//! ## 設計方針
//!
//! - **ID は DB 採番**: `EmployeeId` はクライアント側で生成しない。
//!   挿入時は [`NewEmployee`] を渡し、採番された ID を受け取る
//! - **全フィールド上書き**: 更新は部分更新をサポートせず、
//!   [`Employee::with_details`] で可変フィールドを常にすべて上書きする
//! - **ロールは弱参照**: `role_id` が `None` の社員は「ロール未割り当て」を表す

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::role::RoleId;

/// 社員 ID（一意識別子）
///
/// DB の `BIGSERIAL` シーケンスで採番される整数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct EmployeeId(i64);

impl EmployeeId {
   /// 既存の整数値から社員 ID を作成する
   pub fn from_i64(id: i64) -> Self {
      Self(id)
   }

   /// 内部の整数値を取得する
   pub fn as_i64(&self) -> i64 {
      self.0
   }
}

/// 社員の登録パラメータ
///
/// ID を除く全フィールドを保持する。新規登録と全フィールド上書き更新の
/// 両方で使用する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
   pub employee_number: i32,
   pub first_name:      String,
   pub last_name:       String,
   pub date_joined:     DateTime<Utc>,
   pub extension:       Option<i16>,
   pub role_id:         Option<RoleId>,
}

/// 社員エンティティ
///
/// # 不変条件
///
/// - `id` は構築後に変化しない（[`with_details`](Employee::with_details)
///   でも保持される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
   id:              EmployeeId,
   employee_number: i32,
   first_name:      String,
   last_name:       String,
   date_joined:     DateTime<Utc>,
   extension:       Option<i16>,
   role_id:         Option<RoleId>,
}

impl Employee {
   /// 既存のデータから社員を復元する（データベースから取得時）
   pub fn from_db(id: EmployeeId, details: NewEmployee) -> Self {
      Self {
         id,
         employee_number: details.employee_number,
         first_name: details.first_name,
         last_name: details.last_name,
         date_joined: details.date_joined,
         extension: details.extension,
         role_id: details.role_id,
      }
   }

   // Getter メソッド

   pub fn id(&self) -> EmployeeId {
      self.id
   }

   pub fn employee_number(&self) -> i32 {
      self.employee_number
   }

   pub fn first_name(&self) -> &str {
      &self.first_name
   }

   pub fn last_name(&self) -> &str {
      &self.last_name
   }

   pub fn date_joined(&self) -> DateTime<Utc> {
      self.date_joined
   }

   pub fn extension(&self) -> Option<i16> {
      self.extension
   }

   pub fn role_id(&self) -> Option<RoleId> {
      self.role_id
   }

   // 不変更新メソッド

   /// 可変フィールドをすべて上書きする
   ///
   /// 部分更新はサポートしない。呼び出し元が変更を意図していない
   /// フィールドも常に上書きされる。ID のみ保持される。
   pub fn with_details(self, details: NewEmployee) -> Self {
      Self {
         id: self.id,
         employee_number: details.employee_number,
         first_name: details.first_name,
         last_name: details.last_name,
         date_joined: details.date_joined,
         extension: details.extension,
         role_id: details.role_id,
      }
   }
}
