//! # Courier インフラ層
//!
//! 外部システム（メールリレー）との通信を担当するインフラストラクチャ層。
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない。
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信トレイトと SMTP / Noop 実装
//! - `mock` - テスト用の送信ダブル（`test-utils` feature）

pub mod notification;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
    SmtpSecurity,
    SmtpSettings,
};
