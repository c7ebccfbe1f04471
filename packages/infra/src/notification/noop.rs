//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! メールリレーを用意できないローカル実行時に使用する。

use async_trait::async_trait;
use courier_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            subject = %email.subject,
            "Noop: メール送信をスキップ"
        );
        Ok(())
    }
}
