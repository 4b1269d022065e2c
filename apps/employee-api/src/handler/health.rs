//! # ヘルスチェックハンドラ
//!
//! Employee API の稼働状態を確認するためのエンドポイント。
//!
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（データベースの接続状態を確認）
//!
//! レスポンス型は [`meibo_shared::HealthResponse`] /
//! [`meibo_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use meibo_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
use sqlx::PgPool;

/// ヘルスチェックエンドポイント
///
/// サーバーが正常に稼働していることを確認するためのエンドポイント。
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub pool: PgPool,
}

/// Readiness Check エンドポイント
///
/// データベースの接続状態を確認する。
/// チェック OK → 200、失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(&state.pool).await;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);

    let all_ok = checks.values().all(|s| matches!(s, CheckStatus::Ok));
    let status = if all_ok {
        ReadinessStatus::Ready
    } else {
        ReadinessStatus::NotReady
    };
    let http_status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(ReadinessResponse { status, checks }))
}

/// データベースへの接続を `SELECT 1` で確認する（タイムアウト: 5 秒）
async fn check_database(pool: &PgPool) -> CheckStatus {
    match tokio::time::timeout(Duration::from_secs(5), sqlx::query("SELECT 1").execute(pool)).await
    {
        Ok(Ok(_)) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}
