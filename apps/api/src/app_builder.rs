//! # アプリケーション構築
//!
//! DI（送信実装・時刻プロバイダ・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。
//!
//! 結合テストは同じ関数でルーターを組み立て、送信実装だけをモックに差し替える。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use courier_domain::clock::Clock;
use courier_infra::NotificationSender;
use courier_shared::{
   EmailConfigStatus,
   observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
   catch_panic::CatchPanicLayer,
   cors::CorsLayer,
   request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
   trace::TraceLayer,
};

use crate::{
   config::Environment,
   handler::{
      DocsState,
      HealthState,
      NotificationState,
      docs_page,
      handle_panic,
      health_check,
      method_not_allowed,
      not_found,
      render_docs_page,
      send_notification,
   },
   usecase::{NotificationService, TemplateRenderer},
};

/// ルーター構築に必要な依存
pub struct AppDependencies {
   /// 通知の送信実装
   pub sender:       Arc<dyn NotificationSender>,
   /// 処理時刻の取得元
   pub clock:        Arc<dyn Clock>,
   /// `/health` で報告するメール設定の状態
   pub email_config: EmailConfigStatus,
   /// 実行環境
   pub environment:  Environment,
}

/// DI コンテナの構築とルーター定義を行う
///
/// テンプレートの登録に失敗した場合はエラーを返し、サーバーを起動しない。
pub fn build_app(deps: AppDependencies) -> anyhow::Result<Router> {
   let template_renderer = TemplateRenderer::new()?;

   let notification_state = Arc::new(NotificationState {
      service: NotificationService::new(deps.sender, template_renderer, deps.clock),
   });

   let health_state = Arc::new(HealthState {
      email_config: deps.email_config,
      environment:  deps.environment,
   });

   let docs_state = Arc::new(DocsState {
      page: render_docs_page(deps.environment)?,
   });

   let app = Router::new()
      .route("/", get(docs_page))
      .with_state(docs_state)
      .merge(
         Router::new()
            .route("/health", get(health_check))
            .with_state(health_state),
      )
      .merge(
         Router::new()
            .route("/send-notification", post(send_notification))
            .with_state(notification_state),
      )
      .fallback(not_found)
      .method_not_allowed_fallback(method_not_allowed)
      // レイヤー順序が重要: 下に書いたものが外側
      // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
      // 2. TraceLayer: スパンに request_id を含め、全ログに自動注入
      // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
      // 4. CorsLayer: すべてのオリジンを許可
      // 5. CatchPanicLayer（最内）: panic を 500 の統一エンベロープに変換
      .layer(CatchPanicLayer::custom(handle_panic))
      .layer(CorsLayer::permissive())
      .layer(PropagateRequestIdLayer::x_request_id())
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
      .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

   Ok(app)
}
