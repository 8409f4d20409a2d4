//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names (the names used by the original deployment
//! scripts, e.g. `SERVE_PORT`, `MODEL_DIR`).

use serve_ingress_common::config::{
    EngineConfig, IngressConfig, LoggingConfig, DEFAULT_LLM_SERVICE_NAME,
};

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the legacy variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use serve_ingress::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("INGRESS_PORT", "SERVE_PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Unparseable values fall back to `default` with a warning.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    match get_env_with_fallback(new_name, old_name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                "Environment variable '{}' has invalid value '{}', using default",
                new_name,
                raw
            );
            default
        }),
        None => default,
    }
}

/// 真偽値として解釈する（`1/true/yes/on` を有効とみなす）
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// 空文字列を未設定として扱う
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// LLMサービス無効化フラグを取得
///
/// 環境変数 `INGRESS_LLM_DISABLED`（旧: `LLM_DISABLED`）が `true/1/yes/on` のときに無効化する。
pub fn is_llm_disabled() -> bool {
    get_env_with_fallback("INGRESS_LLM_DISABLED", "LLM_DISABLED")
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

/// 推論エンジン設定を環境変数から読み込む
pub fn engine_config_from_env() -> EngineConfig {
    let defaults = EngineConfig::default();
    let timeout_secs = non_empty(std::env::var("INGRESS_INFERENCE_TIMEOUT_SECS").ok())
        .and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(secs),
            _ => {
                tracing::warn!(
                    "INGRESS_INFERENCE_TIMEOUT_SECS='{}' is not a positive integer; no timeout applied",
                    raw
                );
                None
            }
        });

    EngineConfig {
        base_url: non_empty(get_env_with_fallback(
            "INGRESS_INFERENCE_URL",
            "VLLM_BASE_URL",
        )),
        model_dir: get_env_with_fallback_or("INGRESS_MODEL_DIR", "MODEL_DIR", &defaults.model_dir),
        served_model_name: non_empty(get_env_with_fallback(
            "INGRESS_SERVED_MODEL_NAME",
            "SERVED_MODEL_NAME",
        )),
        tensor_parallel_size: get_env_with_fallback_parse(
            "INGRESS_TENSOR_PARALLEL_SIZE",
            "TENSOR_PARALLEL_SIZE",
            defaults.tensor_parallel_size,
        ),
        timeout_secs,
    }
}

/// Ingress設定を環境変数から読み込む
pub fn ingress_config_from_env() -> IngressConfig {
    let defaults = IngressConfig::default();
    IngressConfig {
        host: get_env_with_fallback_or("INGRESS_HOST", "SERVE_HOST", &defaults.host),
        port: get_env_with_fallback_parse("INGRESS_PORT", "SERVE_PORT", defaults.port),
        llm_disabled: is_llm_disabled(),
        llm_service_name: non_empty(std::env::var("INGRESS_LLM_SERVICE_NAME").ok())
            .unwrap_or_else(|| DEFAULT_LLM_SERVICE_NAME.to_string()),
        engine: engine_config_from_env(),
    }
}

/// ログ設定を環境変数から読み込む
pub fn logging_config_from_env() -> LoggingConfig {
    let defaults = LoggingConfig::default();
    LoggingConfig {
        // RUST_LOG is honoured as-is, without a deprecation warning
        level: non_empty(std::env::var("INGRESS_LOG_LEVEL").ok())
            .or_else(|| non_empty(std::env::var("RUST_LOG").ok()))
            .unwrap_or(defaults.level),
        format: std::env::var("INGRESS_LOG_FORMAT").unwrap_or(defaults.format),
        dir: non_empty(std::env::var("INGRESS_LOG_DIR").ok()),
    }
}
