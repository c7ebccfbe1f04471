//! # 通知ユースケース
//!
//! 通知リクエストからメールを生成し、送信までを行う。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`service`] - タイムスタンプ付与 + テンプレートレンダリング + 送信 + ログ出力

pub mod service;
pub mod template_renderer;

pub use service::{NotificationService, SentNotification};
pub use template_renderer::TemplateRenderer;
