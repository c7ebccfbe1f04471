//! # Courier ドメイン層
//!
//! 通知リクエストとメールメッセージのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **永続化しない**: 通知リクエストは 1 リクエストの処理中にのみ存在する
//! - **不正な状態を作らない**: [`NotificationRequest`](notification::NotificationRequest) は
//!   検証済みのコンストラクタ経由でのみ生成できる
//! - **時刻の注入**: [`Clock`](clock::Clock) により、テストで固定時刻を使える
//!
//! ## モジュール構成
//!
//! - [`notification`] - 通知リクエスト、メールメッセージ、送信エラー
//! - [`clock`] - 時刻プロバイダとタイムスタンプ書式

pub mod clock;
pub mod notification;
