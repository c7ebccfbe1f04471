//! # ヘルスチェック共通型
//!
//! `/health` エンドポイントで使用されるレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// メール送信設定の状態
///
/// 送信元アドレス・送信元認証情報・宛先アドレスの 3 つが揃っていれば `Valid`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailConfigStatus {
    /// 3 つの設定値がすべて存在する
    Valid,
    /// いずれかの設定値が欠けている
    Invalid,
}

impl EmailConfigStatus {
    /// 設定値の有無から状態を判定する
    pub fn from_presence(all_present: bool) -> Self {
        if all_present { Self::Valid } else { Self::Invalid }
    }
}

/// ヘルスチェックレスポンス
///
/// ## 使用例
///
/// ```
/// use courier_shared::{EmailConfigStatus, HealthResponse};
///
/// let response = HealthResponse {
///     status:       "healthy".to_string(),
///     email_config: EmailConfigStatus::Valid,
///     environment:  "production".to_string(),
///     version:      "0.1.0".to_string(),
/// };
/// assert_eq!(response.status, "healthy");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（`"healthy"` 固定）
    pub status:       String,
    /// メール送信設定の状態
    pub email_config: EmailConfigStatus,
    /// 実行環境（`development` / `production`）
    pub environment:  String,
    /// アプリケーションバージョン（Cargo.toml から取得）
    pub version:      String,
}
