//! 推論エンジン抽象
//!
//! LLMサービスは `InferenceEngine` トレイト越しにのみ推論エンジンを呼び出す。
//! 本番実装は OpenAI互換サーバー（vLLM等）に HTTP で委譲する
//! [`openai::OpenAiCompletionsEngine`]。

pub mod openai;

use crate::error::IngressResult;
use async_trait::async_trait;
use serve_ingress_common::protocol::GenerationParams;

pub use openai::OpenAiCompletionsEngine;

/// テキスト生成エンジン
///
/// 同時に複数リクエストから呼び出される。キューイングやバッチングは
/// エンジン側の責務であり、呼び出し側では流量制御を行わない。
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// プロンプトからテキストを生成する
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> IngressResult<String>;

    /// ログ出力用のモデル識別子
    fn model(&self) -> &str;
}
