//! CLI module for serve-ingress
//!
//! Provides command-line interface for starting the ingress server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Serve Ingress - HTTP routing ingress for echo, calculator and LLM services
#[derive(Parser, Debug)]
#[command(name = "serve-ingress")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INGRESS_HOST                    Bind address (default: 0.0.0.0, legacy: SERVE_HOST)
    INGRESS_PORT                    Listen port (default: 8001, legacy: SERVE_PORT)
    INGRESS_MODEL_DIR               Model weights path (legacy: MODEL_DIR)
    INGRESS_TENSOR_PARALLEL_SIZE    Tensor parallel degree (default: 1, legacy: TENSOR_PARALLEL_SIZE)
    INGRESS_INFERENCE_URL           OpenAI-compatible inference server URL (legacy: VLLM_BASE_URL)
    INGRESS_SERVED_MODEL_NAME       Model name on the inference server (default: model dir)
    INGRESS_INFERENCE_TIMEOUT_SECS  Inference request timeout (default: none)
    INGRESS_LLM_DISABLED            Disable the /llm service (legacy: LLM_DISABLED)
    INGRESS_LLM_SERVICE_NAME        Service name reported by /llm (default: TinyLlamaService)
    INGRESS_LOG_LEVEL               Log filter (default: info)
    INGRESS_LOG_FORMAT              pretty | compact | json (default: pretty)
    INGRESS_LOG_DIR                 Directory for rolling log files
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the ingress server
    Serve(serve::ServeArgs),
}
