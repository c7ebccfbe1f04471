//! 結合テスト共通のヘルパー

#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body, http::Request};
use chrono::{Local, TimeZone};
use courier_api::{
   app_builder::{AppDependencies, build_app},
   config::Environment,
};
use courier_domain::clock::FixedClock;
use courier_infra::mock::MockNotificationSender;
use courier_shared::EmailConfigStatus;
use serde_json::Value;

/// テストで固定する処理時刻
pub const FIXED_TIMESTAMP: &str = "2026-10-19 09:30:00";

/// モック送信実装と固定時刻でルーターを組み立てる
pub fn test_app(sender: &MockNotificationSender) -> Router {
   let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
   build_app(AppDependencies {
      sender:       Arc::new(sender.clone()),
      clock:        Arc::new(FixedClock::new(now)),
      email_config: EmailConfigStatus::Valid,
      environment:  Environment::Production,
   })
   .unwrap()
}

/// JSON ボディ付きの POST リクエスト
pub fn post_json(uri: &str, body: &str) -> Request<Body> {
   Request::builder()
      .method("POST")
      .uri(uri)
      .header("content-type", "application/json")
      .body(Body::from(body.to_string()))
      .unwrap()
}

/// レスポンスボディを JSON として読む
pub async fn json_body(response: axum::response::Response) -> Value {
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   serde_json::from_slice(&bytes).unwrap()
}
