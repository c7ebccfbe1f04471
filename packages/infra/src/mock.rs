//! # テスト用モック
//!
//! ハンドラやユースケースのテストで使う `NotificationSender` のテストダブル。
//! `test-utils` feature で公開される。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use courier_domain::notification::{EmailMessage, NotificationError};

use crate::notification::NotificationSender;

/// 呼び出しを記録する `NotificationSender`
///
/// `clone()` したインスタンス同士は記録を共有するため、
/// 一方を State に渡し、もう一方でアサーションできる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    calls:   Arc<Mutex<Vec<EmailMessage>>>,
    failure: Option<NotificationError>,
}

impl MockNotificationSender {
    /// 常に成功するモックを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に指定したエラーを返すモックを作成する
    pub fn failing(error: NotificationError) -> Self {
        Self {
            calls:   Arc::default(),
            failure: Some(error),
        }
    }

    /// `send_email` が呼ばれた回数（失敗した呼び出しを含む）
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// 送信に成功したメール
    pub fn sent(&self) -> Vec<EmailMessage> {
        if self.failure.is_some() {
            return Vec::new();
        }
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.calls.lock().unwrap().push(email.clone());
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
