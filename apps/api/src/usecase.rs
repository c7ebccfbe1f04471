//! # ユースケース層
//!
//! ハンドラから呼ばれるビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **薄いハンドラ**: ハンドラは入力の解釈とレスポンス変換のみを行い、ロジックはユースケースに集約
//! - **依存性注入**: 送信実装と時刻プロバイダはトレイトで受け取る

pub mod notification;

pub use notification::{NotificationService, SentNotification, TemplateRenderer};
