//! # 通知
//!
//! メール通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationRequest`] | 通知リクエスト | 誰がどの操作をしたか。1 リクエストの間だけ存在する |
//! | [`EmailMessage`] | メールメッセージ | 件名と本文。宛先はサーバー設定で固定 |
//! | [`NotificationError`] | 送信エラー | 失敗理由を区別して呼び出し元に返す |
//!
//! ## 設計方針
//!
//! - **欠落も空白も拒否**: `name` / `action` が未指定、またはトリム後に空なら
//!   [`ValidationError`] を返す。`"Unknown"` のような代替値は使わない
//! - **リトライしない**: 送信は 1 回のみ。失敗は値として返す

use strum::IntoStaticStr;
use thiserror::Error;

/// 通知リクエストの入力検証エラー
///
/// `Display` の文字列はそのまま 400 レスポンスの `message` として返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// フィールドが指定されていない
    #[error("{0} is required")]
    MissingField(&'static str),

    /// フィールドがトリム後に空
    #[error("{0} must not be blank")]
    BlankField(&'static str),
}

/// 通知送信エラー
///
/// 詳細文字列はサーバーログ専用。クライアントには固定文言のみ返す。
#[derive(Debug, Clone, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationError {
    /// メールサーバーが認証情報を拒否した
    #[error("メールサーバーが認証を拒否: {0}")]
    AuthenticationRejected(String),

    /// 接続・TLS・SMTP プロトコルレベルの失敗
    #[error("メール送信に失敗: {0}")]
    Transport(String),

    /// アドレス不正などでメッセージを組み立てられない
    #[error("メッセージ構築に失敗: {0}")]
    InvalidMessage(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

impl NotificationError {
    /// ログ出力用の種別名（`authentication_rejected` など）
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// 通知リクエスト
///
/// `name` と `action` はトリム済みで、空でないことが保証される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    name:   String,
    action: String,
}

impl NotificationRequest {
    /// 入力値を検証して通知リクエストを作成する
    ///
    /// `name` を先に検証するため、両方不正な場合は `name` のエラーを返す。
    pub fn new(name: Option<&str>, action: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name:   required_field("name", name)?,
            action: required_field("action", action)?,
        })
    }

    /// 操作したユーザーの名前
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 実行された操作
    pub fn action(&self) -> &str {
        &self.action
    }
}

fn required_field(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?.trim();
    if value.is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(value.to_string())
}

/// メールメッセージ
///
/// 呼び出し元で整形済みの件名と本文。`NotificationSender` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_前後の空白をトリムして保持する() {
        let request = NotificationRequest::new(Some("  Alex "), Some("\tapproved\n")).unwrap();

        assert_eq!(request.name(), "Alex");
        assert_eq!(request.action(), "approved");
    }

    #[test]
    fn test_内部の空白は保持する() {
        let request = NotificationRequest::new(Some("Alex Kim"), Some("approved request")).unwrap();

        assert_eq!(request.name(), "Alex Kim");
        assert_eq!(request.action(), "approved request");
    }

    #[rstest]
    #[case(None, Some("approved"), ValidationError::MissingField("name"))]
    #[case(Some("Alex"), None, ValidationError::MissingField("action"))]
    #[case(None, None, ValidationError::MissingField("name"))]
    #[case(Some(""), Some("approved"), ValidationError::BlankField("name"))]
    #[case(Some("   "), Some("approved"), ValidationError::BlankField("name"))]
    #[case(Some("Alex"), Some(" \t "), ValidationError::BlankField("action"))]
    fn test_欠落または空白のフィールドを拒否する(
        #[case] name: Option<&str>,
        #[case] action: Option<&str>,
        #[case] expected: ValidationError,
    ) {
        let result = NotificationRequest::new(name, action);

        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_validation_errorのメッセージ() {
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "name is required"
        );
        assert_eq!(
            ValidationError::BlankField("action").to_string(),
            "action must not be blank"
        );
    }

    #[test]
    fn test_notification_errorの種別名() {
        assert_eq!(
            NotificationError::AuthenticationRejected(String::new()).kind(),
            "authentication_rejected"
        );
        assert_eq!(NotificationError::Transport(String::new()).kind(), "transport");
        assert_eq!(
            NotificationError::InvalidMessage(String::new()).kind(),
            "invalid_message"
        );
        assert_eq!(
            NotificationError::TemplateFailed(String::new()).kind(),
            "template_failed"
        );
    }
}
