//! # Clock（時刻プロバイダ）
//!
//! ユースケース層での `Local::now()` 直接呼び出しを置き換え、
//! テストで固定時刻を注入可能にするための抽象化。
//!
//! 通知メールのタイムスタンプはプロセスのローカル時刻で記録する。

use chrono::{DateTime, Local};

/// タイムスタンプの書式（`YYYY-MM-DD HH:MM:SS`）
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Local>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Local> {
      Local::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Local>,
}

impl FixedClock {
   pub fn new(now: DateTime<Local>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Local> {
      self.now
   }
}

/// 日時を `YYYY-MM-DD HH:MM:SS` 形式の文字列にする
pub fn format_timestamp(at: &DateTime<Local>) -> String {
   at.format(TIMESTAMP_FORMAT).to_string()
}
