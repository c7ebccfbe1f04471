//! # Observability 基盤
//!
//! トレーシング初期化、ログ出力形式の解決、Request ID の生成を提供する。
//!
//! 出力形式とフィルタの解決は純粋関数として切り出してあり、
//! 環境変数を書き換えずにテストできる。不正な `LOG_FORMAT` は起動を止めず、
//! 初期化後に呼び出し元が `tracing` で警告できるようエラー値として返す。

use std::{fmt, str::FromStr};

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 1 行 1 JSON オブジェクト（ログ収集基盤向け）
    Json,
    /// 人間が読みやすい形式
    Pretty,
}

/// `LOG_FORMAT` に解釈できない値が指定された
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl fmt::Display for UnknownLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown LOG_FORMAT {:?} (expected json or pretty)", self.0)
    }
}

impl std::error::Error for UnknownLogFormat {}

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else if value.eq_ignore_ascii_case("pretty") {
            Ok(Self::Pretty)
        } else {
            Err(UnknownLogFormat(s.to_string()))
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` の値から出力形式を決める
    ///
    /// 未設定・空白のみなら `fallback`。
    pub fn resolve(value: Option<&str>, fallback: Self) -> Result<Self, UnknownLogFormat> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.parse(),
            None => Ok(fallback),
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// ログ出力形式
    pub log_format:     LogFormat,
    /// `RUST_LOG` が未設定または不正なときのフィルタ
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(log_format: LogFormat, default_filter: impl Into<String>) -> Self {
        Self {
            log_format,
            default_filter: default_filter.into(),
        }
    }
}

/// `RUST_LOG` の値からフィルタを組み立てる
///
/// 不正なディレクティブは既定フィルタに置き換える。既定フィルタ自体も不正なら `info`。
#[cfg(feature = "observability")]
pub fn build_env_filter(
    rust_log: Option<&str>,
    default_filter: &str,
) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    rust_log
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// グローバルな subscriber を登録する
///
/// 既に登録済みの場合はエラーを返す。サービス名は呼び出し元で
/// `tracing::info_span!("app", service = "...")` に入ることで JSON ログに含まれる。
#[cfg(feature = "observability")]
pub fn init_tracing(
    config: &TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = build_env_filter(rust_log.as_deref(), &config.default_filter);

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().with_target(false).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

/// UUID v7 で Request ID を生成する `MakeRequestId` 実装
///
/// `SetRequestIdLayer::x_request_id(MakeRequestUuidV7)` として使う。
/// クライアントが `X-Request-Id` を送ってきた場合はそちらが優先される。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = uuid::Uuid::now_v7().to_string();
        http::HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// リクエストごとのスパンを生成する
///
/// `TraceLayer::new_for_http().make_span_with(make_request_span)` として使う。
/// スパンに `request_id` を含めることで、リクエスト内の全ログに自動注入される。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}


#[cfg(all(test, feature = "observability"))]
mod filter_tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::{Layer as _, filter::LevelFilter};

    use super::*;

    #[test]
    fn test_rust_logが指定されていればそれを使う() {
        let filter = build_env_filter(Some("warn"), "info");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_rust_log未設定なら既定フィルタを使う() {
        let filter = build_env_filter(None, "info,courier=debug");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_不正なrust_logは既定フィルタに置き換える() {
        let filter = build_env_filter(Some("courier=loud"), "error");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }
}
