//! # Employee API サーバー
//!
//! 社員名簿の CRUD を提供する HTTP サービス。
//!
//! ## 役割
//!
//! - **社員 CRUD**: 登録・一覧・検索・更新・削除
//! - **ロール参照**: 外部管理されたロールマスタの一覧取得
//! - **データ永続化**: PostgreSQL へのエンティティ保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `EMPLOYEE_API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `EMPLOYEE_API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p meibo-employee-api
//!
//! # 本番環境
//! EMPLOYEE_API_PORT=3000 DATABASE_URL=postgres://... \
//!    cargo run -p meibo-employee-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use meibo_employee_api::{
   config::ApiConfig,
   handler::{EmployeeState, ReadinessState, RoleState},
   router::build_router,
   usecase::EmployeeUseCaseImpl,
};
use meibo_infra::{
   db,
   repository::{PostgresEmployeeRepository, PostgresRoleRepository},
};
use meibo_shared::{LogFormat, TracingConfig};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Employee API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("employee-api");
   init_tracing(&tracing_config);
   tracing::info!(
      service = %tracing_config.service_name,
      "トレーシングを初期化しました"
   );

   // 設定読み込み
   let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

   tracing::info!(
      "Employee API サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成し、マイグレーションを適用
   let pool = db::create_pool(&config.database_url)
      .await
      .expect("データベース接続に失敗しました");
   tracing::info!("データベースに接続しました");

   db::run_migrations(&pool)
      .await
      .expect("マイグレーションの適用に失敗しました");

   // 依存コンポーネントを初期化
   let employee_repository = PostgresEmployeeRepository::new(pool.clone());
   let employee_state = Arc::new(EmployeeState {
      usecase: EmployeeUseCaseImpl::new(Arc::new(employee_repository)),
   });

   let role_state = Arc::new(RoleState {
      role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
   });

   let readiness_state = Arc::new(ReadinessState { pool });

   // ルーター構築
   let app = build_router(employee_state, role_state, readiness_state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Employee API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}

/// トレーシングを初期化する
///
/// `LOG_FORMAT` に応じて JSON / Pretty の fmt レイヤを選択する。
fn init_tracing(config: &TracingConfig) {
   let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| "info,meibo_employee_api=debug,meibo_infra=debug".into());

   match config.log_format {
      LogFormat::Json => tracing_subscriber::registry()
         .with(env_filter)
         .with(tracing_subscriber::fmt::layer().json())
         .init(),
      LogFormat::Pretty => tracing_subscriber::registry()
         .with(env_filter)
         .with(tracing_subscriber::fmt::layer())
         .init(),
   };
}
