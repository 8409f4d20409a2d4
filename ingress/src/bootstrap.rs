//! サーバー初期化ロジック
//!
//! 推論エンジン接続、各サービスとルーターの構築を一箇所で行い、
//! リスナーが接続を受け付ける前に `AppState` を完成させる。

use crate::engine::OpenAiCompletionsEngine;
use crate::error::{IngressError, IngressResult};
use crate::ingress::Ingress;
use crate::services::{Calculator, EchoService, LlmService};
use crate::AppState;
use serve_ingress_common::config::IngressConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// サーバー初期化を実行する
///
/// 推論エンジンが構成されているのに接続できない場合はエラーを返す
/// （壊れたLLMエンドポイントを公開しないため、起動を中断する）。
pub async fn initialize(config: &IngressConfig) -> IngressResult<AppState> {
    info!("Serve Ingress v{}", env!("CARGO_PKG_VERSION"));

    let llm = build_llm_service(config).await?;
    let ingress = Ingress::new(EchoService::default(), Calculator::default(), llm);

    info!(
        "Routes: /echo, /calc, /llm ({})",
        if ingress.llm_available() {
            "ready"
        } else {
            "unavailable"
        }
    );

    Ok(AppState::new(ingress))
}

/// LLMサービスを構築する
///
/// - 無効化フラグが立っている場合: `None`
/// - 推論エンジンURLが未設定の場合: 警告を出して `None`
/// - 接続に失敗した場合: `IngressError::EngineInit`
pub async fn build_llm_service(config: &IngressConfig) -> IngressResult<Option<LlmService>> {
    if config.llm_disabled {
        info!("LLM service disabled by configuration");
        return Ok(None);
    }
    if config.engine.base_url.is_none() {
        warn!("Inference engine not configured (INGRESS_INFERENCE_URL); LLM service will not be deployed");
        return Ok(None);
    }

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| IngressError::Http(format!("failed to build HTTP client: {}", e)))?;
    let engine = OpenAiCompletionsEngine::connect(&config.engine, client).await?;

    let service = LlmService::new(Arc::new(engine), config.llm_service_name.clone());
    info!("{} initialized successfully", service.name());
    Ok(Some(service))
}
