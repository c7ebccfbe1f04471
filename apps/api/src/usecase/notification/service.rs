//! # 通知サービス
//!
//! タイムスタンプ付与 → テンプレートレンダリング → メール送信 → ログ出力を統合するサービス。
//!
//! ## 設計方針
//!
//! - **1 リクエスト 1 送信**: リトライ・キューイング・永続化は行わない
//! - **失敗は値で返す**: 送信失敗は `NotificationError` として呼び出し元に返す
//! - **依存性注入**: `NotificationSender` と `Clock` は trait で抽象化

use std::sync::Arc;

use courier_domain::{
    clock::{Clock, format_timestamp},
    notification::{NotificationError, NotificationRequest},
};
use courier_infra::NotificationSender;

use super::TemplateRenderer;

/// 送信済み通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    /// 処理時刻（`YYYY-MM-DD HH:MM:SS`）
    pub timestamp: String,
}

/// 通知サービス
pub struct NotificationService {
    sender: Arc<dyn NotificationSender>,
    template_renderer: TemplateRenderer,
    clock: Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        template_renderer: TemplateRenderer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sender,
            template_renderer,
            clock,
        }
    }

    /// 通知メールを 1 通送信する
    ///
    /// 失敗の詳細はここでログに出力する。呼び出し元はクライアント向けの固定文言だけを返せばよい。
    pub async fn send(
        &self,
        request: &NotificationRequest,
    ) -> Result<SentNotification, NotificationError> {
        let timestamp = format_timestamp(&self.clock.now());

        let email = self
            .template_renderer
            .render(request, &timestamp)
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    error.kind = e.kind(),
                    "通知テンプレートのレンダリングに失敗"
                );
            })?;

        match self.sender.send_email(&email).await {
            Ok(()) => {
                tracing::info!(
                    notification.name = request.name(),
                    notification.action = request.action(),
                    notification.timestamp = %timestamp,
                    "通知メール送信成功"
                );
                Ok(SentNotification { timestamp })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error.kind = e.kind(),
                    notification.name = request.name(),
                    notification.action = request.action(),
                    "通知メール送信失敗"
                );
                Err(e)
            }
        }
    }
}
