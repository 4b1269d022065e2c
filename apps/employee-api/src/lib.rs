//! # Employee API ライブラリ
//!
//! Employee API のユースケース・ハンドラ・ルーター構築を公開する。
//! テスト用に内部モジュールへのアクセスを提供する。

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod usecase;
