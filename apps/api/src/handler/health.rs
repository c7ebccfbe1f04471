//! # ヘルスチェックハンドラ
//!
//! サービスの稼働状態とメール送信設定の有無を返す。
//!
//! ## エンドポイント
//!
//! ```text
//! GET /health
//! ```
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "email_config": "valid",
//!   "environment": "production",
//!   "version": "0.1.0"
//! }
//! ```
//!
//! メールリレーへの接続は確認しない。`email_config` は起動時に読み込んだ
//! 設定値が揃っているかどうかだけを表す。

use std::sync::Arc;

use axum::{Json, extract::State};
use courier_shared::{EmailConfigStatus, HealthResponse};

use crate::config::Environment;

/// ヘルスチェックハンドラの State
pub struct HealthState {
   pub email_config: EmailConfigStatus,
   pub environment:  Environment,
}

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK を返す。
pub async fn health_check(State(state): State<Arc<HealthState>>) -> Json<HealthResponse> {
   Json(HealthResponse {
      status:       "healthy".to_string(),
      email_config: state.email_config,
      environment:  state.environment.as_str().to_string(),
      version:      env!("CARGO_PKG_VERSION").to_string(),
   })
}
