//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では STARTTLS 必須で外部リレー（既定: `smtp.gmail.com:587`）に認証付きで接続し、
//! 開発環境では Mailpit（ローカル SMTP サーバー）に平文で接続する。
//!
//! 接続は送信ごとに確立し、送信が終わった時点で閉じる（プールしない）。

use async_trait::async_trait;
use courier_domain::notification::{EmailMessage, NotificationError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::NotificationSender;

/// 認証失敗を示す SMTP 応答コード
///
/// 530: 認証が必要 / 534: 認証方式が弱い / 535: 認証情報が不正 / 538: 暗号化が必要
const AUTH_FAILURE_CODES: [&str; 4] = ["530", "534", "535", "538"];

/// SMTP 接続のセキュリティモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// STARTTLS 必須 + 認証（外部リレー向け）
    #[default]
    StartTls,
    /// 平文・認証なし（Mailpit 等のローカル SMTP 向け）
    None,
}

/// SMTP 送信設定
///
/// 宛先はサーバー設定で固定され、HTTP クライアントからは指定できない。
#[derive(Clone)]
pub struct SmtpSettings {
    /// リレーのホスト名
    pub host:         String,
    /// リレーのポート番号
    pub port:         u16,
    /// セキュリティモード
    pub security:     SmtpSecurity,
    /// 送信元アドレス（SMTP 認証のユーザー名を兼ねる）
    pub from_address: String,
    /// 送信元の認証情報（アプリパスワード）
    pub password:     String,
    /// 宛先アドレス
    pub to_address:   String,
}

/// SMTP 通知送信
///
/// 送信元・宛先アドレスは構築時にパースし、不正なら起動時にエラーにする。
pub struct SmtpNotificationSender {
    host:        String,
    port:        u16,
    security:    SmtpSecurity,
    credentials: Credentials,
    from:        Mailbox,
    to:          Mailbox,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// 送信元・宛先アドレスのパースに失敗した場合は
    /// [`NotificationError::InvalidMessage`] を返す。
    pub fn new(settings: SmtpSettings) -> Result<Self, NotificationError> {
        let from = settings
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::InvalidMessage(format!("送信元アドレス不正: {e}")))?;
        let to = settings
            .to_address
            .parse::<Mailbox>()
            .map_err(|e| NotificationError::InvalidMessage(format!("宛先アドレス不正: {e}")))?;

        Ok(Self {
            host: settings.host,
            port: settings.port,
            security: settings.security,
            credentials: Credentials::new(settings.from_address, settings.password),
            from,
            to,
        })
    }

    fn build_message(&self, email: &EmailMessage) -> Result<Message, NotificationError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.text_body.clone())
            .map_err(|e| NotificationError::InvalidMessage(format!("メッセージ構築失敗: {e}")))
    }

    /// 1 回の送信専用のトランスポートを構築する
    ///
    /// pool feature を有効にしていないため、`send` ごとに接続・QUIT が行われる。
    /// 送信途中で失敗した場合も、トランスポートの drop で接続は閉じられる。
    fn open_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotificationError> {
        let transport = match self.security {
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
                    .map_err(|e| NotificationError::Transport(format!("TLS 設定失敗: {e}")))?
                    .port(self.port)
                    .credentials(self.credentials.clone())
                    .build()
            }
            // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.host)
                .port(self.port)
                .build(),
        };
        Ok(transport)
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = self.build_message(email)?;
        let transport = self.open_transport()?;

        tracing::debug!(
            host = %self.host,
            port = self.port,
            "SMTP セッションを開始"
        );

        transport.send(message).await.map_err(classify_smtp_error)?;

        Ok(())
    }
}

/// lettre のエラーを認証拒否とそれ以外に振り分ける
fn classify_smtp_error(error: lettre::transport::smtp::Error) -> NotificationError {
    let auth_rejected = error
        .status()
        .is_some_and(|code| is_auth_failure_code(&code.to_string()));

    if auth_rejected {
        NotificationError::AuthenticationRejected(error.to_string())
    } else {
        NotificationError::Transport(error.to_string())
    }
}

fn is_auth_failure_code(code: &str) -> bool {
    AUTH_FAILURE_CODES.contains(&code)
}
