//! # ロール（役職マスタ）
//!
//! 社員に割り当てられる役職を表す参照データ。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: ロールのライフサイクルはこのシステムの外部で管理される。
//!   本 API はロールを参照するだけで、作成・更新・削除の操作面を持たない
//! - **弱い関連**: 社員はロール ID を保持するだけで、ロールを所有しない

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// ロール ID（一意識別子）
///
/// DB の `SERIAL` シーケンスで採番される整数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct RoleId(i32);

impl RoleId {
   /// 既存の整数値からロール ID を作成する
   pub fn from_i32(id: i32) -> Self {
      Self(id)
   }

   /// 内部の整数値を取得する
   pub fn as_i32(&self) -> i32 {
      self.0
   }
}

/// ロールエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
   id:   RoleId,
   name: String,
}

impl Role {
   /// 既存のデータからロールを復元する（データベースから取得時）
   pub fn from_db(id: RoleId, name: String) -> Self {
      Self { id, name }
   }

   pub fn id(&self) -> RoleId {
      self.id
   }

   pub fn name(&self) -> &str {
      &self.name
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_ロールidは内部の整数値を返す() {
      let id = RoleId::from_i32(7);
      assert_eq!(id.as_i32(), 7);
   }

   #[test]
   fn test_ロールidのdisplayは整数値を出力する() {
      let id = RoleId::from_i32(42);
      assert_eq!(format!("{id}"), "42");
   }

   #[test]
   fn test_from_dbで全フィールドが復元される() {
      let role = Role::from_db(RoleId::from_i32(1), "Manager".to_string());

      assert_eq!(role.id(), RoleId::from_i32(1));
      assert_eq!(role.name(), "Manager");
   }
}
