//! エラー型定義
//!
//! Ingressサーバーの統一エラー型（thiserror使用）
//!
//! ハンドラー内で発生したエラーはレスポンスの `error` フィールドに文字列として
//! 埋め込まれる。起動時のエラー（推論エンジン初期化失敗、バインド失敗）のみが
//! プロセスを終了させる。

use thiserror::Error;

/// Ingress error type
#[derive(Debug, Error)]
pub enum IngressError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inference engine failed to initialize
    #[error("Inference engine initialization failed: {0}")]
    EngineInit(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Upstream returned a body we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// I/O error (listener bind, log files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ingress層のResult型エイリアス
pub type IngressResult<T> = Result<T, IngressError>;
