//! # フォールバックハンドラ
//!
//! どのルートにも一致しないリクエストと、ハンドラ内の panic を
//! 統一エンベロープのエラーレスポンスに変換する。

use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// 未定義のルート（404）
pub async fn not_found() -> ApiError {
   ApiError::NotFound
}

/// 定義済みのパスに対する未対応メソッド（405）
pub async fn method_not_allowed() -> ApiError {
   ApiError::MethodNotAllowed
}

/// `CatchPanicLayer` から呼ばれる panic ハンドラ
///
/// panic の内容はログにのみ出力し、クライアントには汎用メッセージを返す。
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
   let detail = if let Some(s) = panic.downcast_ref::<String>() {
      s.clone()
   } else if let Some(s) = panic.downcast_ref::<&str>() {
      (*s).to_string()
   } else {
      "unknown panic".to_string()
   };

   ApiError::Internal(anyhow::anyhow!("ハンドラで panic が発生: {detail}")).into_response()
}
