//! バックエンドサービス
//!
//! 各サービスは構築時に決まるサービス名以外の状態を持たず、
//! 複数リクエストから同時に呼び出せる。

pub mod calculator;
pub mod echo;
pub mod llm;

pub use calculator::Calculator;
pub use echo::EchoService;
pub use llm::LlmService;
