//! OpenAI互換推論サーバークライアント
//!
//! `GET /v1/models` で起動時に疎通確認し、`POST /v1/completions` で生成する。

use super::InferenceEngine;
use crate::error::{IngressError, IngressResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serve_ingress_common::config::EngineConfig;
use serve_ingress_common::protocol::GenerationParams;
use std::time::Duration;
use tracing::{debug, info, warn};

/// `POST /v1/completions` リクエストボディ
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

/// `POST /v1/completions` レスポンス（必要なフィールドのみ）
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: String,
}

/// `GET /v1/models` レスポンス
#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// OpenAI互換の `/v1/completions` を呼び出す推論エンジン
#[derive(Debug, Clone)]
pub struct OpenAiCompletionsEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiCompletionsEngine {
    /// 推論サーバーに接続する
    ///
    /// `/v1/models` に到達できない場合は `IngressError::EngineInit` を返す。
    /// 壊れたLLMエンドポイントを公開しないため、呼び出し側は起動を中断する。
    pub async fn connect(config: &EngineConfig, client: reqwest::Client) -> IngressResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| IngressError::Config("inference URL is not configured".to_string()))?
            .trim_end_matches('/')
            .to_string();

        info!("Loading model from: {}", config.model_dir);
        info!("Tensor parallel size: {}", config.tensor_parallel_size);

        let engine = Self {
            client,
            base_url,
            model: config.model_name().to_string(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        };
        engine.probe().await?;

        info!(
            "Inference engine ready at {} (model: {})",
            engine.base_url, engine.model
        );
        Ok(engine)
    }

    /// `/v1/models` で疎通確認し、モデルが公開されているか確認する
    async fn probe(&self) -> IngressResult<()> {
        let url = format!("{}/v1/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| IngressError::EngineInit(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngressError::EngineInit(format!(
                "{} returned {}",
                url, status
            )));
        }

        match response.json::<ModelList>().await {
            Ok(list) if !list.data.iter().any(|m| m.id == self.model) => {
                let ids: Vec<_> = list.data.iter().map(|m| m.id.as_str()).collect();
                warn!(
                    "Model '{}' is not listed by the inference server (available: {:?})",
                    self.model, ids
                );
            }
            Ok(_) => {}
            Err(e) => debug!("Could not parse model list from {}: {}", url, e),
        }
        Ok(())
    }

    /// 推論サーバーのベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl InferenceEngine for OpenAiCompletionsEngine {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> IngressResult<String> {
        let url = format!("{}/v1/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                IngressError::Timeout(format!("inference request timed out: {}", e))
            } else {
                IngressError::Http(format!("inference request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("Failed to read error body from inference server: {}", e);
                    String::new()
                }
            };
            warn!("Inference server returned error {}: {}", status, error_body);
            return Err(IngressError::Http(format!(
                "Inference server returned {}: {}",
                status, error_body
            )));
        }

        let completion = response
            .json::<CompletionResponse>()
            .await
            .map_err(|e| IngressError::InvalidResponse(format!("completion body: {}", e)))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .unwrap_or_default())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
