//! # Employee API エラー定義
//!
//! API 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## 設計方針
//!
//! - エラーレスポンスのボディはプレーンテキスト（ステータスコード +
//!   人間が読める文字列）。構造化エラーオブジェクトは返さない
//! - ストレージエラー（500）は基盤のエラーメッセージをそのまま
//!   呼び出し元へ透過する。サーバー側には SpanTrace 付きで記録する

use axum::{
   http::StatusCode,
   response::{IntoResponse, Response},
};
use meibo_infra::InfraError;
use thiserror::Error;

/// Employee API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// リソースが見つからない
   #[error("{0}")]
   NotFound(String),

   /// 不正なリクエスト
   #[error("{0}")]
   BadRequest(String),

   /// ストレージエラー
   ///
   /// `context` は操作名（例: `"Error adding employee"`）。
   #[error("{context}: {source}")]
   Storage {
      context: &'static str,
      source:  InfraError,
   },
}

impl ApiError {
   /// ストレージエラーを操作コンテキスト付きで生成する
   pub fn storage(context: &'static str, source: InfraError) -> Self {
      Self::Storage { context, source }
   }
}

/// ストレージエラーの詳細メッセージを取り出す
///
/// 基盤（sqlx）のエラーメッセージを優先し、なければ InfraError の
/// 表示文字列を使う。
fn storage_detail(source: &InfraError) -> String {
   use std::error::Error as _;

   source
      .source()
      .map(|e| e.to_string())
      .unwrap_or_else(|| source.to_string())
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      match self {
         ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
         ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
         ApiError::Storage { context, source } => {
            tracing::error!("ストレージエラー: {}\n{}", source, source.span_trace());
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               format!("{context}: {}", storage_detail(&source)),
            )
               .into_response()
         }
      }
   }
}
