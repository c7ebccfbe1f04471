//! # エラーレスポンス
//!
//! 全エンドポイントで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API クレートの責務（shared に axum 依存を入れない）
//! - HTTP ステータスはボディに含めず、レスポンスのステータスコードで表す
//! - 500 系の message は固定値（内部情報を漏らさないため）

use serde::{Deserialize, Serialize};

use crate::ResponseStatus;

/// 内部エラー時の固定メッセージ
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// 通知送信失敗時の固定メッセージ
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email notification";

/// エラーレスポンス
///
/// `{"status":"error","message":"..."}` 形式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub status:  ResponseStatus,
   pub message: String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         status:  ResponseStatus::Error,
         message: message.into(),
      }
   }

   /// 400 Bad Request
   ///
   /// バリデーションエラーの内容をそのまま返す。
   pub fn bad_request(message: impl Into<String>) -> Self {
      Self::new(message)
   }

   /// 404 Not Found
   pub fn not_found() -> Self {
      Self::new("Endpoint not found")
   }

   /// 405 Method Not Allowed
   pub fn method_not_allowed() -> Self {
      Self::new("Method not allowed")
   }

   /// 500 通知送信失敗
   ///
   /// 送信失敗の理由（認証拒否・接続失敗など）は区別せず固定文言を返す。
   pub fn send_failed() -> Self {
      Self::new(SEND_FAILED_MESSAGE)
   }

   /// 500 Internal Server Error
   pub fn internal_error() -> Self {
      Self::new(INTERNAL_ERROR_MESSAGE)
   }
}
