//! ロギング初期化
//!
//! `tracing-subscriber` の EnvFilter + fmt レイヤーを構成する。
//! `LoggingConfig::dir` が設定されている場合は `tracing-appender` による
//! 日次ローテーションのファイル出力を追加する。

use crate::error::{IngressError, IngressResult};
use serve_ingress_common::config::LoggingConfig;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ファイル出力のワーカーガード（プロセス終了まで保持）
static FILE_LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// ログファイル名のプレフィックス
const LOG_FILE_PREFIX: &str = "serve-ingress.log";

/// 環境変数から設定を読み込んでロギングを初期化する
pub fn init() -> IngressResult<()> {
    init_with(&crate::config::logging_config_from_env())
}

/// 指定した設定でロギングを初期化する
pub fn init_with(config: &LoggingConfig) -> IngressResult<()> {
    let filter = build_filter(&config.level);

    let stdout_layer = format_layer(&config.format, std::io::stdout);

    let file_layer = match config.dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_LOG_GUARD.set(guard);
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| IngressError::Config(format!("failed to initialize logging: {}", e)))
}

/// フィルタ文字列からEnvFilterを構築する（不正な場合は `info`）
fn build_filter(level: &str) -> EnvFilter {
    let level = level.trim();
    if level.is_empty() {
        return EnvFilter::new("info");
    }
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}; falling back to info", level, e);
        EnvFilter::new("info")
    })
}

fn format_layer<S, W>(format: &str, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        "json" => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        "compact" => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        _ => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(writer)
            .boxed(),
    }
}
