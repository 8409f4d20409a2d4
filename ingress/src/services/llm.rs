//! LLMアダプターサービス
//!
//! プロンプト（文字列またはOpenAI形式のメッセージ列）を解決し、
//! 推論エンジンに生成を委譲する。推論エラーは `error` フィールドに変換し、
//! 呼び出し元へ伝播させない。

use crate::engine::InferenceEngine;
use serde_json::Value;
use serve_ingress_common::protocol::{ChatMessage, ChatPrompt, GenerationParams, JsonObject, Reply};
use std::sync::Arc;
use tracing::{debug, warn};

const USAGE_ERROR: &str = "Send a POST request with 'prompt' or 'messages' field";
const MISSING_PROMPT: &str = "Missing 'prompt' or 'messages' field";

/// LLMサービス（Ready状態）
///
/// 構築できた時点でReady。利用不可の状態はルーター側で `None` として表現する。
#[derive(Clone)]
pub struct LlmService {
    engine: Arc<dyn InferenceEngine>,
    service_name: String,
}

impl std::fmt::Debug for LlmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmService")
            .field("service_name", &self.service_name)
            .field("model", &self.engine.model())
            .finish()
    }
}

impl LlmService {
    /// 推論エンジンをラップしてサービスを作成する
    pub fn new(engine: Arc<dyn InferenceEngine>, service_name: impl Into<String>) -> Self {
        Self {
            engine,
            service_name: service_name.into(),
        }
    }

    /// サービス名
    pub fn name(&self) -> &str {
        &self.service_name
    }

    /// リクエストを処理する
    pub async fn handle(&self, body: Option<&JsonObject>) -> Reply {
        let Some(body) = body else {
            return self.error(USAGE_ERROR);
        };

        let prompt = match resolve_prompt(body) {
            Ok(prompt) => prompt.render(),
            Err(message) => return self.error(message),
        };
        let params = match resolve_params(body) {
            Ok(params) => params,
            Err(message) => return self.error(message),
        };

        debug!(
            model = self.engine.model(),
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            "Generating completion"
        );

        match self.engine.generate(&prompt, &params).await {
            Ok(response) => Reply::Completion {
                prompt,
                response,
                service: self.service_name.clone(),
            },
            Err(e) => {
                warn!("Inference failed for {}: {}", self.service_name, e);
                self.error(e.to_string())
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> Reply {
        Reply::service_error(message, self.service_name.as_str())
    }
}

/// `messages` を優先し、なければ `prompt` を使う
fn resolve_prompt(body: &JsonObject) -> Result<ChatPrompt, String> {
    if let Some(messages) = body.get("messages") {
        let messages: Vec<ChatMessage> = serde_json::from_value(messages.clone())
            .map_err(|e| format!("Invalid 'messages' field: {}", e))?;
        return Ok(ChatPrompt::Messages(messages));
    }

    match body.get("prompt") {
        Some(Value::String(prompt)) => Ok(ChatPrompt::Text(prompt.clone())),
        Some(other) => Err(format!(
            "Invalid 'prompt' field: expected a string, got {}",
            other
        )),
        None => Err(MISSING_PROMPT.to_string()),
    }
}

/// 生成パラメータを検証付きで取り出す
fn resolve_params(body: &JsonObject) -> Result<GenerationParams, String> {
    let defaults = GenerationParams::default();

    let max_tokens = match body.get("max_tokens") {
        None | Some(Value::Null) => defaults.max_tokens,
        Some(value) => value
            .as_u64()
            .filter(|n| *n > 0)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                format!(
                    "Invalid 'max_tokens' field: expected a positive integer, got {}",
                    value
                )
            })?,
    };

    let temperature = match body.get("temperature") {
        None | Some(Value::Null) => defaults.temperature,
        Some(value) => value
            .as_f64()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| {
                format!(
                    "Invalid 'temperature' field: expected a non-negative number, got {}",
                    value
                )
            })?,
    };

    Ok(GenerationParams {
        max_tokens,
        temperature,
    })
}
