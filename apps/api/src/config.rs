//! # アプリケーション設定
//!
//! 環境変数からアプリケーション設定を読み込む。
//!
//! ## 設計方針
//!
//! [12-Factor App](https://12factor.net/ja/config) の原則に従い、
//! すべての設定を環境変数から読み込む。
//!
//! - 起動時に一度だけ [`AppConfig`] を構築し、各コンポーネントに渡す（グローバル状態にしない）
//! - 必須の値が欠けている場合は [`ConfigError`] を返し、サーバーを起動しない
//! - 空文字列は未設定と同じ扱い
//! - 値の前後の空白は除去する（`SENDER_PASSWORD` のみ値をそのまま保持する）
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `SENDER_EMAIL` | **Yes** | - | 送信元アドレス（SMTP ユーザー名を兼ねる） |
//! | `SENDER_PASSWORD` | **Yes** | - | 送信元の認証情報（アプリパスワード） |
//! | `RECIPIENT_EMAIL` | **Yes** | - | 通知の宛先アドレス |
//! | `PORT` | **Yes** | - | HTTP サーバーのポート番号 |
//! | `APP_ENV` | **Yes** | - | 実行環境（`development` / `production`） |
//! | `HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `SMTP_HOST` | No | `smtp.gmail.com` | メールリレーのホスト |
//! | `SMTP_PORT` | No | `587` | メールリレーのポート |
//! | `SMTP_SECURITY` | No | `starttls` | `starttls` / `none`（Mailpit 用、`production` では不可） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` | `smtp` / `noop` |
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use courier_api::config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("サーバー: {}:{}", config.host, config.port);
//! ```

use std::{env, fmt};

use courier_infra::{SmtpSecurity, SmtpSettings};
use courier_shared::{EmailConfigStatus, observability::LogFormat};
use thiserror::Error;

/// 既定のメールリレー
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// 設定の読み込みエラー
///
/// 起動時にのみ発生し、発生した場合はサーバーを起動しない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
   /// 必須の環境変数が未設定（または空）
   #[error("{0} が設定されていません")]
   Missing(&'static str),

   /// 値の形式が不正
   #[error("{name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// 実行環境
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
   /// 開発環境（Pretty ログ、debug レベル）
   Development,
   /// 本番環境（JSON ログ、info レベル）
   #[default]
   Production,
}

impl Environment {
   fn parse(value: &str) -> Option<Self> {
      if value.eq_ignore_ascii_case("development") {
         Some(Self::Development)
      } else if value.eq_ignore_ascii_case("production") {
         Some(Self::Production)
      } else {
         None
      }
   }

   pub fn as_str(&self) -> &'static str {
      match self {
         Self::Development => "development",
         Self::Production => "production",
      }
   }

   /// `LOG_FORMAT` 未設定時のログ形式
   pub fn default_log_format(&self) -> LogFormat {
      match self {
         Self::Development => LogFormat::Pretty,
         Self::Production => LogFormat::Json,
      }
   }

   /// `RUST_LOG` 未設定時のフィルタ
   pub fn default_log_filter(&self) -> &'static str {
      match self {
         Self::Development => "info,courier=debug,tower_http=debug",
         Self::Production => "info",
      }
   }
}

/// 通知の送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
   /// SMTP リレー経由で送信
   #[default]
   Smtp,
   /// 送信しない（ログ出力のみ）
   Noop,
}

/// 通知機能の設定
#[derive(Clone)]
pub struct NotificationConfig {
   pub backend:         NotificationBackend,
   pub smtp_host:       String,
   pub smtp_port:       u16,
   pub smtp_security:   SmtpSecurity,
   pub sender_email:    String,
   pub sender_password: String,
   pub recipient_email: String,
}

impl NotificationConfig {
   /// 送信元アドレス・認証情報・宛先アドレスがすべて揃っているか
   pub fn email_config_status(&self) -> EmailConfigStatus {
      EmailConfigStatus::from_presence(
         [
            &self.sender_email,
            &self.sender_password,
            &self.recipient_email,
         ]
         .iter()
         .all(|value| !value.trim().is_empty()),
      )
   }

   /// SMTP 送信実装に渡す設定を作る
   pub fn smtp_settings(&self) -> SmtpSettings {
      SmtpSettings {
         host:         self.smtp_host.clone(),
         port:         self.smtp_port,
         security:     self.smtp_security,
         from_address: self.sender_email.clone(),
         password:     self.sender_password.clone(),
         to_address:   self.recipient_email.clone(),
      }
   }
}

// 認証情報をログに出さないよう Debug を手書きする
impl fmt::Debug for NotificationConfig {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("NotificationConfig")
         .field("backend", &self.backend)
         .field("smtp_host", &self.smtp_host)
         .field("smtp_port", &self.smtp_port)
         .field("smtp_security", &self.smtp_security)
         .field("sender_email", &self.sender_email)
         .field("sender_password", &"***")
         .field("recipient_email", &self.recipient_email)
         .finish()
   }
}

/// アプリケーション全体の設定
#[derive(Debug, Clone)]
pub struct AppConfig {
   /// バインドアドレス
   pub host:         String,
   /// ポート番号
   pub port:         u16,
   /// 実行環境
   pub environment:  Environment,
   /// 通知設定
   pub notification: NotificationConfig,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// テストでプロセスの環境変数を書き換えずに検証するために使う。
   pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
   where
      F: Fn(&str) -> Option<String>,
   {
      let vars = Vars { lookup };

      let notification = NotificationConfig {
         backend:         vars.optional("NOTIFICATION_BACKEND", NotificationBackend::Smtp, |v| {
            match v {
               "smtp" => Some(NotificationBackend::Smtp),
               "noop" => Some(NotificationBackend::Noop),
               _ => None,
            }
         })?,
         smtp_host:       vars
            .get("SMTP_HOST")
            .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
         smtp_port:       vars.optional("SMTP_PORT", DEFAULT_SMTP_PORT, |v| v.parse().ok())?,
         smtp_security:   vars.optional("SMTP_SECURITY", SmtpSecurity::StartTls, |v| match v {
            "starttls" => Some(SmtpSecurity::StartTls),
            "none" => Some(SmtpSecurity::None),
            _ => None,
         })?,
         sender_email:    vars.required("SENDER_EMAIL")?,
         sender_password: vars.required_secret("SENDER_PASSWORD")?,
         recipient_email: vars.required("RECIPIENT_EMAIL")?,
      };

      let environment = vars.parsed("APP_ENV", Environment::parse)?;

      // 本番で TLS と認証の両方を外す設定は受け付けない
      if environment == Environment::Production
         && notification.backend == NotificationBackend::Smtp
         && notification.smtp_security == SmtpSecurity::None
      {
         return Err(ConfigError::Invalid {
            name:  "SMTP_SECURITY",
            value: "none".to_string(),
         });
      }

      Ok(Self {
         host: vars.get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port: vars.parsed("PORT", |v| v.parse().ok())?,
         environment,
         notification,
      })
   }
}

/// 環境変数の参照ヘルパー
struct Vars<F> {
   lookup: F,
}

impl<F> Vars<F>
where
   F: Fn(&str) -> Option<String>,
{
   /// 値を取得する（空白のみの値は未設定扱い）
   fn get(&self, name: &str) -> Option<String> {
      (self.lookup)(name)
         .map(|v| v.trim().to_string())
         .filter(|v| !v.is_empty())
   }

   fn required(&self, name: &'static str) -> Result<String, ConfigError> {
      self.get(name).ok_or(ConfigError::Missing(name))
   }

   /// 認証情報を取得する
   ///
   /// 空白判定にのみトリムを使い、値そのものは加工しない。
   fn required_secret(&self, name: &'static str) -> Result<String, ConfigError> {
      (self.lookup)(name)
         .filter(|v| !v.trim().is_empty())
         .ok_or(ConfigError::Missing(name))
   }

   /// 必須の値をパースする
   fn parsed<T>(
      &self,
      name: &'static str,
      parse: impl Fn(&str) -> Option<T>,
   ) -> Result<T, ConfigError> {
      let value = self.required(name)?;
      parse(&value).ok_or(ConfigError::Invalid { name, value })
   }

   /// 任意の値をパースする（未設定ならデフォルト）
   fn optional<T>(
      &self,
      name: &'static str,
      default: T,
      parse: impl Fn(&str) -> Option<T>,
   ) -> Result<T, ConfigError> {
      match self.get(name) {
         Some(value) => parse(&value).ok_or(ConfigError::Invalid { name, value }),
         None => Ok(default),
      }
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn base_vars() -> HashMap<&'static str, &'static str> {
      HashMap::from([
         ("SENDER_EMAIL", "sender@example.com"),
         ("SENDER_PASSWORD", "app-password"),
         ("RECIPIENT_EMAIL", "recipient@example.com"),
         ("PORT", "10000"),
         ("APP_ENV", "production"),
      ])
   }

   fn load(vars: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
      AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
   }

   #[test]
   fn test_必須項目のみでデフォルト値が補完される() {
      let config = load(&base_vars()).unwrap();

      assert_eq!(config.host, "0.0.0.0");
      assert_eq!(config.port, 10000);
      assert_eq!(config.environment, Environment::Production);
      assert_eq!(config.notification.backend, NotificationBackend::Smtp);
      assert_eq!(config.notification.smtp_host, "smtp.gmail.com");
      assert_eq!(config.notification.smtp_port, 587);
      assert_eq!(config.notification.smtp_security, SmtpSecurity::StartTls);
      assert_eq!(config.notification.sender_email, "sender@example.com");
      assert_eq!(config.notification.recipient_email, "recipient@example.com");
   }

   #[rstest]
   #[case("SENDER_EMAIL")]
   #[case("SENDER_PASSWORD")]
   #[case("RECIPIENT_EMAIL")]
   #[case("PORT")]
   #[case("APP_ENV")]
   fn test_必須項目が欠けているとmissingを返す(#[case] name: &'static str) {
      let mut vars = base_vars();
      vars.remove(name);

      assert_eq!(load(&vars).unwrap_err(), ConfigError::Missing(name));
   }

   #[test]
   fn test_空白のみの値は未設定扱い() {
      let mut vars = base_vars();
      vars.insert("SENDER_PASSWORD", "   ");

      assert_eq!(
         load(&vars).unwrap_err(),
         ConfigError::Missing("SENDER_PASSWORD")
      );
   }

   #[rstest]
   #[case("PORT", "not-a-port")]
   #[case("PORT", "70000")]
   #[case("APP_ENV", "staging")]
   #[case("SMTP_PORT", "abc")]
   #[case("SMTP_SECURITY", "ssl")]
   #[case("NOTIFICATION_BACKEND", "ses")]
   fn test_不正な値はinvalidを返す(#[case] name: &'static str, #[case] value: &'static str) {
      let mut vars = base_vars();
      vars.insert(name, value);

      assert_eq!(
         load(&vars).unwrap_err(),
         ConfigError::Invalid {
            name,
            value: value.to_string(),
         }
      );
   }

   #[test]
   fn test_任意項目を上書きできる() {
      let mut vars = base_vars();
      vars.insert("HOST", "127.0.0.1");
      vars.insert("APP_ENV", "Development");
      vars.insert("SMTP_HOST", "localhost");
      vars.insert("SMTP_PORT", "1025");
      vars.insert("SMTP_SECURITY", "none");
      vars.insert("NOTIFICATION_BACKEND", "noop");

      let config = load(&vars).unwrap();

      assert_eq!(config.host, "127.0.0.1");
      assert_eq!(config.environment, Environment::Development);
      assert_eq!(config.notification.backend, NotificationBackend::Noop);
      assert_eq!(config.notification.smtp_host, "localhost");
      assert_eq!(config.notification.smtp_port, 1025);
      assert_eq!(config.notification.smtp_security, SmtpSecurity::None);
   }

   #[test]
   fn test_認証情報の前後の空白は保持される() {
      let mut vars = base_vars();
      vars.insert("SENDER_PASSWORD", " pass word ");

      let config = load(&vars).unwrap();

      assert_eq!(config.notification.sender_password, " pass word ");
   }

   #[test]
   fn test_本番でsmtp_security_noneは拒否される() {
      let mut vars = base_vars();
      vars.insert("SMTP_SECURITY", "none");

      assert_eq!(
         load(&vars).unwrap_err(),
         ConfigError::Invalid {
            name:  "SMTP_SECURITY",
            value: "none".to_string(),
         }
      );
   }

   #[rstest]
   #[case("development", "smtp")]
   #[case("production", "noop")]
   fn test_開発環境かnoopならsmtp_security_noneを許可する(
      #[case] app_env: &'static str,
      #[case] backend: &'static str,
   ) {
      let mut vars = base_vars();
      vars.insert("APP_ENV", app_env);
      vars.insert("NOTIFICATION_BACKEND", backend);
      vars.insert("SMTP_SECURITY", "none");

      let config = load(&vars).unwrap();

      assert_eq!(config.notification.smtp_security, SmtpSecurity::None);
   }

   #[test]
   fn test_3つのメール設定が揃っていればvalid() {
      let config = load(&base_vars()).unwrap();

      assert_eq!(
         config.notification.email_config_status(),
         EmailConfigStatus::Valid
      );
   }

   #[test]
   fn test_メール設定が欠けていればinvalid() {
      let mut notification = load(&base_vars()).unwrap().notification;
      notification.recipient_email = String::new();

      assert_eq!(
         notification.email_config_status(),
         EmailConfigStatus::Invalid
      );
   }

   #[test]
   fn test_debug出力に認証情報を含まない() {
      let config = load(&base_vars()).unwrap();
      let debug = format!("{config:?}");

      assert!(!debug.contains("app-password"));
      assert!(debug.contains("sender_password: \"***\""));
   }

   #[test]
   fn test_smtp_settingsに送信元と宛先を引き継ぐ() {
      let settings = load(&base_vars()).unwrap().notification.smtp_settings();

      assert_eq!(settings.host, "smtp.gmail.com");
      assert_eq!(settings.port, 587);
      assert_eq!(settings.from_address, "sender@example.com");
      assert_eq!(settings.password, "app-password");
      assert_eq!(settings.to_address, "recipient@example.com");
   }

   #[test]
   fn test_環境ごとのログ設定() {
      assert_eq!(
         Environment::Development.default_log_format(),
         LogFormat::Pretty
      );
      assert_eq!(Environment::Production.default_log_format(), LogFormat::Json);
      assert_eq!(Environment::Production.default_log_filter(), "info");
   }
}
