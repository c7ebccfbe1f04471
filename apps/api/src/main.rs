//! # Courier API サーバー
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p courier-api
//!
//! # ローカルの Mailpit に送る
//! SMTP_HOST=localhost SMTP_PORT=1025 SMTP_SECURITY=none cargo run -p courier-api
//! ```
//!
//! 環境変数の一覧は [`courier_api::config`] を参照。

use std::sync::Arc;

use anyhow::Context as _;
use courier_api::{
   app_builder::{AppDependencies, build_app},
   config::{AppConfig, Environment, NotificationBackend},
};
use courier_domain::clock::SystemClock;
use courier_infra::{NoopNotificationSender, NotificationSender, SmtpNotificationSender};
use courier_shared::observability::{LogFormat, TracingConfig, init_tracing};
use tokio::net::TcpListener;

const SERVICE_NAME: &str = "courier-api";

/// サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. アプリケーション設定の読み込み
/// 3. トレーシングの初期化（ログ形式とフィルタは実行環境で決まる）
/// 4. 送信実装の選択とルーターの構築
/// 5. HTTP サーバーの起動（Ctrl-C / SIGTERM で graceful shutdown）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   let config = AppConfig::from_env();

   // 設定エラーもログに残すため、読み込み結果に関わらずトレーシングを先に初期化する
   let environment = config
      .as_ref()
      .map(|c| c.environment)
      .unwrap_or(Environment::Production);
   let log_format = LogFormat::resolve(
      std::env::var("LOG_FORMAT").ok().as_deref(),
      environment.default_log_format(),
   );
   init_tracing(&TracingConfig::new(
      log_format
         .as_ref()
         .map_or(environment.default_log_format(), |format| *format),
      environment.default_log_filter(),
   ))
   .context("トレーシングの初期化に失敗しました")?;
   let _tracing_guard = tracing::info_span!("app", service = SERVICE_NAME).entered();

   if let Err(e) = &log_format {
      tracing::warn!(error = %e, "既定のログ形式を使用します");
   }

   let config = config.inspect_err(|e| {
      tracing::error!(error = %e, "設定の読み込みに失敗しました");
   })?;

   tracing::info!(
      environment = config.environment.as_str(),
      "サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   let sender: Arc<dyn NotificationSender> = match config.notification.backend {
      NotificationBackend::Smtp => {
         tracing::info!(
            smtp.host = %config.notification.smtp_host,
            smtp.port = config.notification.smtp_port,
            smtp.security = ?config.notification.smtp_security,
            "SMTP 送信を使用します"
         );
         Arc::new(
            SmtpNotificationSender::new(config.notification.smtp_settings())
               .context("SMTP 送信の初期化に失敗しました")?,
         )
      }
      NotificationBackend::Noop => {
         tracing::warn!("NOTIFICATION_BACKEND=noop: メールは送信されません");
         Arc::new(NoopNotificationSender)
      }
   };

   let app = build_app(AppDependencies {
      sender,
      clock: Arc::new(SystemClock),
      email_config: config.notification.email_config_status(),
      environment: config.environment,
   })?;

   let addr = format!("{}:{}", config.host, config.port);
   let listener = TcpListener::bind(&addr)
      .await
      .with_context(|| format!("{addr} へのバインドに失敗しました"))?;
   tracing::info!("サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   tracing::info!("サーバーを停止しました");
   Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("シャットダウンシグナルを受信しました");
}
