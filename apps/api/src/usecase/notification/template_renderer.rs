//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知メールのプレーンテキスト本文を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **件名パターン**: `New notification: {name} - {action}`
//! - **件名は 1 行**: 入力に改行が含まれていても空白 1 つに畳み込む

use courier_domain::notification::{EmailMessage, NotificationError, NotificationRequest};
use tera::{Context, Tera};

const NOTIFICATION_TEMPLATE: &str = "notification.txt";

/// テンプレートレンダラー
///
/// tera テンプレートエンジンをラップし、`NotificationRequest` から
/// `EmailMessage` を生成する。
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// プレーンテキストなので autoescape は無効にする。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();
        engine.autoescape_on(vec![]);

        engine
            .add_raw_template(
                NOTIFICATION_TEMPLATE,
                include_str!("../../../templates/notifications/notification.txt"),
            )
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知リクエストからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `request`: 検証済みの通知リクエスト
    /// - `timestamp`: `YYYY-MM-DD HH:MM:SS` 形式の処理時刻
    pub fn render(
        &self,
        request: &NotificationRequest,
        timestamp: &str,
    ) -> Result<EmailMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("name", request.name());
        context.insert("action", request.action());
        context.insert("timestamp", timestamp);

        let text_body = self
            .engine
            .render(NOTIFICATION_TEMPLATE, &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        let subject = format!("New notification: {} - {}", request.name(), request.action())
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        Ok(EmailMessage { subject, text_body })
    }
}
