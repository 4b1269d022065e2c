//! # ロールハンドラ
//!
//! ロール参照の公開 API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/employees/getroles` - ロール一覧（無フィルタ）
//!
//! ロールの作成・更新・削除の操作面はない（ロールデータは外部管理）。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use meibo_infra::repository::RoleRepository;
use serde::Serialize;

use crate::error::ApiError;

/// ロール API の共有状態
pub struct RoleState {
    pub role_repository: Arc<dyn RoleRepository>,
}

/// ロール DTO
#[derive(Debug, Serialize)]
pub struct RoleDto {
    #[serde(rename = "RoleID")]
    pub role_id:   i32,
    #[serde(rename = "RoleName")]
    pub role_name: String,
}

/// GET /api/employees/getroles
///
/// 全ロールを無フィルタで取得する。
pub async fn list_roles(
    State(state): State<Arc<RoleState>>,
) -> Result<impl IntoResponse, ApiError> {
    let roles = state
        .role_repository
        .find_all()
        .await
        .map_err(|e| ApiError::storage("Error fetching roles", e))?;

    let items: Vec<RoleDto> = roles
        .into_iter()
        .map(|role| RoleDto {
            role_id:   role.id().as_i32(),
            role_name: role.name().to_string(),
        })
        .collect();

    Ok((StatusCode::OK, Json(items)))
}
