//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換を行う。
//!
//! ## 設計方針
//!
//! - **統一エンベロープ**: すべてのエラーを `{"status": "error", "message": ...}` で返す
//! - **thiserror + anyhow**: 型安全なエラー定義とエラーチェインの両立
//! - **詳細はログのみ**: SMTP の応答や内部エラーの詳細はクライアントに返さない
//!
//! ## エラーの階層
//!
//! ```text
//! ドメイン層エラー (ValidationError / NotificationError)
//!        ↓ 変換
//! API エラー (ApiError)
//!        ↓ IntoResponse
//! HTTP レスポンス (StatusCode + JSON)
//! ```

use axum::{
   Json,
   extract::rejection::JsonRejection,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use courier_domain::notification::{NotificationError, ValidationError};
use courier_shared::ErrorResponse;
use thiserror::Error;

/// API 層で発生するエラー
///
/// ハンドラから返されるエラー型。`IntoResponse` を実装しているため、
/// axum が自動的に HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum ApiError {
   /// リクエストボディを JSON として解釈できない（400 Bad Request）
   #[error("リクエストボディが不正: {0}")]
   InvalidBody(String),

   /// 入力検証エラー（400 Bad Request）
   ///
   /// `Display` の文字列をそのままクライアントに返す。
   #[error(transparent)]
   Validation(#[from] ValidationError),

   /// 通知送信エラー（500 Internal Server Error）
   ///
   /// 詳細は送信処理側でログ出力済み。クライアントには固定文言のみ返す。
   #[error(transparent)]
   Notification(#[from] NotificationError),

   /// ルートが存在しない（404 Not Found）
   #[error("エンドポイントが見つかりません")]
   NotFound,

   /// ルートは存在するがメソッドが許可されていない（405 Method Not Allowed）
   #[error("メソッドが許可されていません")]
   MethodNotAllowed,

   /// 内部サーバーエラー（500 Internal Server Error）
   ///
   /// # セキュリティ注意
   ///
   /// 内部エラーの詳細はクライアントに返さない。
   /// エラー内容はサーバーサイドのログにのみ出力する。
   #[error("内部サーバーエラー")]
   Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for ApiError {
   fn from(rejection: JsonRejection) -> Self {
      let message = match rejection {
         JsonRejection::MissingJsonContentType(_) => "Content-Type must be application/json",
         JsonRejection::JsonSyntaxError(_) => "Request body must be valid JSON",
         JsonRejection::JsonDataError(_) => "Request body has an invalid shape",
         JsonRejection::BytesRejection(_) => "Failed to read request body",
         _ => "Invalid request body",
      };
      ApiError::InvalidBody(message.to_string())
   }
}

impl IntoResponse for ApiError {
   /// `ApiError` を axum の HTTP レスポンスに変換する
   ///
   /// | ApiError | HTTP Status |
   /// |----------|-------------|
   /// | InvalidBody | 400 |
   /// | Validation | 400 |
   /// | Notification | 500 |
   /// | NotFound | 404 |
   /// | MethodNotAllowed | 405 |
   /// | Internal | 500 |
   fn into_response(self) -> Response {
      let (status, error_response) = match self {
         ApiError::InvalidBody(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
         ApiError::Validation(err) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::bad_request(err.to_string()),
         ),
         ApiError::Notification(NotificationError::TemplateFailed(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::internal_error(),
         ),
         ApiError::Notification(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::send_failed(),
         ),
         ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::not_found()),
         ApiError::MethodNotAllowed => (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::method_not_allowed(),
         ),
         ApiError::Internal(err) => {
            tracing::error!("内部エラー: {:?}", err);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(error_response)).into_response()
   }
}

#[cfg(test)]
mod tests {
   use axum::body::to_bytes;
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::{Value, json};

   use super::*;

   async fn into_parts(error: ApiError) -> (StatusCode, Value) {
      let response = error.into_response();
      let status = response.status();
      let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
      (status, serde_json::from_slice(&body).unwrap())
   }

   #[rstest]
   #[case(
      ApiError::Validation(ValidationError::MissingField("name")),
      StatusCode::BAD_REQUEST,
      "name is required"
   )]
   #[case(
      ApiError::Validation(ValidationError::BlankField("action")),
      StatusCode::BAD_REQUEST,
      "action must not be blank"
   )]
   #[case(
      ApiError::InvalidBody("Request body must be valid JSON".to_string()),
      StatusCode::BAD_REQUEST,
      "Request body must be valid JSON"
   )]
   #[case(ApiError::NotFound, StatusCode::NOT_FOUND, "Endpoint not found")]
   #[case(
      ApiError::MethodNotAllowed,
      StatusCode::METHOD_NOT_ALLOWED,
      "Method not allowed"
   )]
   #[tokio::test]
   async fn test_エラー種別ごとのステータスとメッセージ(
      #[case] error: ApiError,
      #[case] expected_status: StatusCode,
      #[case] expected_message: &str,
   ) {
      let (status, body) = into_parts(error).await;

      assert_eq!(status, expected_status);
      assert_eq!(
         body,
         json!({ "status": "error", "message": expected_message })
      );
   }

   #[tokio::test]
   async fn test_送信失敗はsmtpの詳細を含めない() {
      let error = ApiError::Notification(NotificationError::AuthenticationRejected(
         "535 5.7.8 Username and Password not accepted".to_string(),
      ));

      let (status, body) = into_parts(error).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(
         body,
         json!({ "status": "error", "message": "Failed to send email notification" })
      );
   }

   #[tokio::test]
   async fn test_テンプレート失敗は汎用の内部エラーになる() {
      let error = ApiError::Notification(NotificationError::TemplateFailed(
         "missing variable".to_string(),
      ));

      let (status, body) = into_parts(error).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body["message"], "Internal server error");
   }

   #[tokio::test]
   async fn test_anyhowエラーは詳細を隠す() {
      let error = ApiError::from(anyhow::anyhow!("database password leaked"));

      let (status, body) = into_parts(error).await;

      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
      assert_eq!(body["message"], "Internal server error");
   }
}
