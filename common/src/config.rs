//! 設定管理
//!
//! IngressConfig, EngineConfig, LoggingConfig等の設定構造体

use serde::{Deserialize, Serialize};

/// LLMサービスのデフォルト名
pub const DEFAULT_LLM_SERVICE_NAME: &str = "TinyLlamaService";

/// Ingress設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngressConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8001)
    #[serde(default = "default_port")]
    pub port: u16,

    /// LLMサービスを無効化する (デフォルト: false)
    #[serde(default)]
    pub llm_disabled: bool,

    /// LLMサービス名 (デフォルト: "TinyLlamaService")
    #[serde(default = "default_llm_service_name")]
    pub llm_service_name: String,

    /// 推論エンジン設定
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_llm_service_name() -> String {
    DEFAULT_LLM_SERVICE_NAME.to_string()
}

impl IngressConfig {
    /// バインドアドレス（`host:port`）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            llm_disabled: false,
            llm_service_name: default_llm_service_name(),
            engine: EngineConfig::default(),
        }
    }
}

/// 推論エンジン設定
///
/// `base_url` が未設定の場合、推論エンジンは構成されていないものとして扱う。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// OpenAI互換推論サーバーのURL (例: "http://localhost:8000")
    #[serde(default)]
    pub base_url: Option<String>,

    /// モデル重みのパス
    #[serde(default = "default_model_dir")]
    pub model_dir: String,

    /// 推論サーバー上のモデル名（未設定時は `model_dir`）
    #[serde(default)]
    pub served_model_name: Option<String>,

    /// テンソル並列度 (デフォルト: 1)
    #[serde(default = "default_tensor_parallel_size")]
    pub tensor_parallel_size: u32,

    /// 推論リクエストのタイムアウト（秒）。未設定ならタイムアウトなし
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_model_dir() -> String {
    "/mnt/shared/cluster-llm/TinyLlama-1.1B-Chat-v1.0".to_string()
}

fn default_tensor_parallel_size() -> u32 {
    1
}

impl EngineConfig {
    /// リクエストに指定するモデル名
    pub fn model_name(&self) -> &str {
        self.served_model_name
            .as_deref()
            .unwrap_or(self.model_dir.as_str())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model_dir: default_model_dir(),
            served_model_name: None,
            tensor_parallel_size: default_tensor_parallel_size(),
            timeout_secs: None,
        }
    }
}

/// ログ設定（環境変数からのみ構築される）
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// ログレベル / フィルタ (デフォルト: "info")
    pub level: String,

    /// 出力形式: "pretty" / "compact" / "json" (デフォルト: "pretty")
    pub format: String,

    /// ログファイル出力ディレクトリ（未設定なら標準出力のみ）
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            dir: None,
        }
    }
}
