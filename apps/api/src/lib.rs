//! # Courier API サーバー
//!
//! クライアントから受け取った小さな JSON ペイロードを、外部の SMTP リレー経由で
//! メールとして転送する HTTP バックエンド。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────────────────┐     ┌─────────────┐
//! │   Client    │────▶│          Courier API             │────▶│ SMTP Relay  │
//! │             │     │ handler → usecase → infra sender │     │ (STARTTLS)  │
//! └─────────────┘     └──────────────────────────────────┘     └─────────────┘
//! ```
//!
//! 保存・再送・キューイングは行わない。1 リクエストにつき送信は 1 回。
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - State の組み立てとルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - 通知メールの生成と送信
//!
//! ## 依存関係
//!
//! - `courier_domain`: 通知リクエスト・メールメッセージ・時刻プロバイダ
//! - `courier_infra`: メール送信実装（SMTP / Noop）
//! - `courier_shared`: レスポンス型、オブザーバビリティ

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
