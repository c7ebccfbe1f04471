//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "status": ..., "message": ... }` を提供する。
//!
//! 成功・失敗どちらのレスポンスも `status` フィールドで判別できる。
//! 失敗側の型は [`ErrorResponse`](crate::ErrorResponse) を参照。

use serde::{Deserialize, Serialize};

/// レスポンスの成否
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// 処理成功
    Success,
    /// 処理失敗
    Error,
}

/// 成功レスポンス
///
/// `timestamp` は処理時刻を返すエンドポイントでのみ出力される。
///
/// ## 使用例
///
/// ```
/// use courier_shared::{ResponseStatus, SuccessResponse};
///
/// let response = SuccessResponse::new("Email sent successfully")
///     .with_timestamp("2026-10-19 09:30:00");
/// assert_eq!(response.status, ResponseStatus::Success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status:    ResponseStatus,
    pub message:   String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl SuccessResponse {
    /// 新しい `SuccessResponse` を作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status:    ResponseStatus::Success,
            message:   message.into(),
            timestamp: None,
        }
    }

    /// 処理時刻を付与する
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
