//! # 通知送信ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! POST /send-notification
//! Content-Type: application/json
//!
//! {"name": "Alex", "action": "approved"}
//! ```
//!
//! ## レスポンス
//!
//! | 状況 | ステータス | `message` |
//! |------|-----------|-----------|
//! | 送信成功 | 200 | `Email sent successfully`（`timestamp` 付き） |
//! | ボディ不正・入力検証エラー | 400 | 具体的な理由 |
//! | 送信失敗 | 500 | `Failed to send email notification` |
//!
//! 入力が不正な場合は送信処理を呼び出さない。

use std::sync::Arc;

use axum::{
   Json,
   extract::{State, rejection::JsonRejection},
};
use courier_domain::notification::NotificationRequest;
use courier_shared::SuccessResponse;
use serde::Deserialize;

use crate::{error::ApiError, usecase::NotificationService};

/// 通知送信ハンドラの State
pub struct NotificationState {
   pub service: NotificationService,
}

/// 通知送信リクエスト
///
/// 欠落と空文字を区別するため `Option` で受け取り、検証はドメイン層で行う。
#[derive(Debug, Deserialize)]
pub struct SendNotificationRequest {
   pub name:   Option<String>,
   pub action: Option<String>,
}

/// POST /send-notification
pub async fn send_notification(
   State(state): State<Arc<NotificationState>>,
   payload: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, ApiError> {
   let Json(body) = payload.inspect_err(|rejection| {
      tracing::warn!(error = %rejection, "リクエストボディの解釈に失敗");
   })?;

   let request = NotificationRequest::new(body.name.as_deref(), body.action.as_deref())
      .inspect_err(|e| {
         tracing::warn!(error = %e, "通知リクエストの検証に失敗");
      })?;

   let sent = state.service.send(&request).await?;

   Ok(Json(
      SuccessResponse::new("Email sent successfully").with_timestamp(sent.timestamp),
   ))
}
