//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（本番・Mailpit）、Noop（リレーなしのローカル実行）
//! - **1 回だけ送る**: リトライ・キューイング・送信記録の永続化は行わない

mod noop;
mod smtp;

use async_trait::async_trait;
use courier_domain::notification::{EmailMessage, NotificationError};
pub use noop::NoopNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSecurity, SmtpSettings};

/// メール送信トレイト
///
/// 宛先と送信元は実装側の設定で固定され、呼び出し元は件名と本文のみを渡す。
/// 失敗は [`NotificationError`] の値として返し、panic しない。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを 1 通送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;
}
