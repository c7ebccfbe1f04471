//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ロジックはユースケース層に委譲
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs              # 親モジュール（re-export）
//! └── handler/
//!     ├── docs.rs         # HTML ドキュメントページ
//!     ├── fallback.rs     # 404 / 405 / panic のレスポンス
//!     ├── health.rs       # ヘルスチェックハンドラ
//!     └── notification.rs # 通知送信ハンドラ
//! ```

pub mod docs;
pub mod fallback;
pub mod health;
pub mod notification;

pub use docs::{DocsState, docs_page, render_docs_page};
pub use fallback::{handle_panic, method_not_allowed, not_found};
pub use health::{HealthState, health_check};
pub use notification::{NotificationState, SendNotificationRequest, send_notification};
