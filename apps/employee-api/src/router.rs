//! # ルーター構築
//!
//! DI（State）を受け取り、ルートテーブルとミドルウェアを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## CORS
//!
//! すべてのオリジン・メソッド・ヘッダを許可する
//! （ブラウザのフロントエンドから直接呼ばれるため）。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handler::{
   EmployeeState,
   ReadinessState,
   RoleState,
   create_employee,
   delete_employee,
   health_check,
   list_employees,
   list_roles,
   readiness_check,
   search_employees,
   update_employee,
};

/// ルーターを構築する
///
/// 静的パス（`/search`, `/getroles`）はパスパラメータ（`/{id}`）より
/// 優先してマッチする。
pub fn build_router(
   employee_state: Arc<EmployeeState>,
   role_state: Arc<RoleState>,
   readiness_state: Arc<ReadinessState>,
) -> Router {
   Router::new()
      .route("/health", get(health_check))
      .route("/health/ready", get(readiness_check))
      .with_state(readiness_state)
      .route("/api/employees", post(create_employee).get(list_employees))
      .route("/api/employees/search", get(search_employees))
      .route(
         "/api/employees/{id}",
         put(update_employee).delete(delete_employee),
      )
      .with_state(employee_state)
      .route("/api/employees/getroles", get(list_roles))
      .with_state(role_state)
      .layer(TraceLayer::new_for_http())
      .layer(CorsLayer::permissive())
}
