//! # 社員ハンドラ
//!
//! 社員 CRUD の公開 API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/employees` - 社員登録（ロール名付きの射影を返す）
//! - `GET /api/employees` - 社員一覧（ロール名付き、社員 ID 降順）
//! - `GET /api/employees/search?searchTerm=` - 名前の部分一致検索（射影なし）
//! - `PUT /api/employees/{id}` - 社員更新（全フィールド上書き）
//! - `DELETE /api/employees/{id}` - 社員削除
//!
//! ## フィールド名
//!
//! JSON のフィールド名は上流のクライアントとの契約を維持するため、
//! `EmployeeID` / `FirstName` のような表記を serde のリネームで固定する。

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, Query, State},
   http::StatusCode,
   response::IntoResponse,
};
use chrono::{DateTime, Utc};
use meibo_domain::{
   employee::{Employee, EmployeeId, NewEmployee},
   role::RoleId,
};
use serde::{Deserialize, Serialize};

use crate::{
   error::ApiError,
   usecase::employee::{EmployeeUseCaseImpl, UpdateEmployeeInput},
};

/// 社員 API の共有状態
pub struct EmployeeState {
   pub usecase: EmployeeUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 社員の登録・更新リクエスト
///
/// `EmployeeID` は登録時には無視される（ID は DB が採番する）。
/// 更新時はパスの ID との一致検証に使用し、未指定は 0 として扱う。
#[derive(Debug, Deserialize)]
pub struct EmployeeRequest {
   #[serde(rename = "EmployeeID", default)]
   pub employee_id:     i64,
   #[serde(rename = "EmployeeNumber")]
   pub employee_number: i32,
   #[serde(rename = "FirstName")]
   pub first_name:      String,
   #[serde(rename = "LastName")]
   pub last_name:       String,
   #[serde(rename = "DateJoined")]
   pub date_joined:     DateTime<Utc>,
   #[serde(rename = "Extension", default)]
   pub extension:       Option<i16>,
   #[serde(rename = "RoleID", default)]
   pub role_id:         Option<i32>,
}

impl EmployeeRequest {
   fn into_new_employee(self) -> NewEmployee {
      NewEmployee {
         employee_number: self.employee_number,
         first_name:      self.first_name,
         last_name:       self.last_name,
         date_joined:     self.date_joined,
         extension:       self.extension,
         role_id:         self.role_id.map(RoleId::from_i32),
      }
   }
}

/// ロール名付きの社員 DTO（射影）
#[derive(Debug, Serialize)]
pub struct EmployeeWithRoleDto {
   #[serde(rename = "EmployeeID")]
   pub employee_id:     i64,
   #[serde(rename = "EmployeeNumber")]
   pub employee_number: i32,
   #[serde(rename = "FirstName")]
   pub first_name:      String,
   #[serde(rename = "LastName")]
   pub last_name:       String,
   #[serde(rename = "DateJoined")]
   pub date_joined:     DateTime<Utc>,
   #[serde(rename = "Extension")]
   pub extension:       Option<i16>,
   #[serde(rename = "RoleID")]
   pub role_id:         Option<i32>,
   #[serde(rename = "RoleName")]
   pub role_name:       Option<String>,
}

impl EmployeeWithRoleDto {
   fn from_parts(employee: Employee, role_name: Option<String>) -> Self {
      Self {
         employee_id: employee.id().as_i64(),
         employee_number: employee.employee_number(),
         first_name: employee.first_name().to_string(),
         last_name: employee.last_name().to_string(),
         date_joined: employee.date_joined(),
         extension: employee.extension(),
         role_id: employee.role_id().map(|r| r.as_i32()),
         role_name,
      }
   }
}

/// ロール名を含まない社員 DTO（検索結果用）
#[derive(Debug, Serialize)]
pub struct EmployeeDto {
   #[serde(rename = "EmployeeID")]
   pub employee_id:     i64,
   #[serde(rename = "EmployeeNumber")]
   pub employee_number: i32,
   #[serde(rename = "FirstName")]
   pub first_name:      String,
   #[serde(rename = "LastName")]
   pub last_name:       String,
   #[serde(rename = "DateJoined")]
   pub date_joined:     DateTime<Utc>,
   #[serde(rename = "Extension")]
   pub extension:       Option<i16>,
   #[serde(rename = "RoleID")]
   pub role_id:         Option<i32>,
}

impl EmployeeDto {
   fn from_employee(employee: Employee) -> Self {
      Self {
         employee_id: employee.id().as_i64(),
         employee_number: employee.employee_number(),
         first_name: employee.first_name().to_string(),
         last_name: employee.last_name().to_string(),
         date_joined: employee.date_joined(),
         extension: employee.extension(),
         role_id: employee.role_id().map(|r| r.as_i32()),
      }
   }
}

/// 検索クエリパラメータ
///
/// `searchTerm` 未指定は空文字列として扱い、部分一致フィルタに
/// そのまま渡す（空文字列は全件一致）。
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
   #[serde(rename = "searchTerm", default)]
   pub search_term: String,
}

// --- ハンドラ ---

/// POST /api/employees
///
/// 社員を登録し、ロール名付きの射影を返す。
///
/// ## レスポンス
///
/// - `200 OK`: 登録された社員（射影）
/// - `404 Not Found`: 登録直後の読み直しが空（防御的ガード）
/// - `500 Internal Server Error`: ストレージエラー
pub async fn create_employee(
   State(state): State<Arc<EmployeeState>>,
   Json(req): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let (employee, role_name) = state
      .usecase
      .create_employee(req.into_new_employee())
      .await?;

   Ok((
      StatusCode::OK,
      Json(EmployeeWithRoleDto::from_parts(employee, role_name)),
   ))
}

/// GET /api/employees
///
/// 全社員をロール名付きで取得する（社員 ID 降順）。
/// ページネーションもフィルタリングも行わない。
pub async fn list_employees(
   State(state): State<Arc<EmployeeState>>,
) -> Result<impl IntoResponse, ApiError> {
   let employees = state.usecase.list_employees().await?;

   let items: Vec<EmployeeWithRoleDto> = employees
      .into_iter()
      .map(|(employee, role_name)| EmployeeWithRoleDto::from_parts(employee, role_name))
      .collect();

   Ok((StatusCode::OK, Json(items)))
}

/// GET /api/employees/search?searchTerm=
///
/// 名または姓に部分一致する社員を取得する（射影なし、社員 ID 降順）。
pub async fn search_employees(
   State(state): State<Arc<EmployeeState>>,
   Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
   let employees = state.usecase.search_employees(&query.search_term).await?;

   let items: Vec<EmployeeDto> = employees.into_iter().map(EmployeeDto::from_employee).collect();

   Ok((StatusCode::OK, Json(items)))
}

/// DELETE /api/employees/{id}
///
/// 社員を削除する。冪等ではない: 存在しない ID の削除は 404 を返す。
///
/// ## レスポンス
///
/// - `200 OK`: 削除完了（プレーンテキスト）
/// - `404 Not Found`: 社員が見つからない
pub async fn delete_employee(
   State(state): State<Arc<EmployeeState>>,
   Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
   state
      .usecase
      .delete_employee(EmployeeId::from_i64(id))
      .await?;

   Ok((StatusCode::OK, "Employee deleted successfully"))
}

/// PUT /api/employees/{id}
///
/// 社員を更新する。部分更新はサポートせず、可変フィールドを
/// すべて上書きする。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の社員（射影）
/// - `400 Bad Request`: パスの ID とボディの `EmployeeID` が不一致
/// - `404 Not Found`: 社員が見つからない（更新前・更新後いずれか）
/// - `500 Internal Server Error`: ストレージエラー
pub async fn update_employee(
   State(state): State<Arc<EmployeeState>>,
   Path(id): Path<i64>,
   Json(req): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
   let input = UpdateEmployeeInput {
      id:               EmployeeId::from_i64(id),
      body_employee_id: EmployeeId::from_i64(req.employee_id),
      details:          req.into_new_employee(),
   };

   let (employee, role_name) = state.usecase.update_employee(input).await?;

   Ok((
      StatusCode::OK,
      Json(EmployeeWithRoleDto::from_parts(employee, role_name)),
   ))
}
