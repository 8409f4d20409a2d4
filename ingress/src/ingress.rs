//! Ingressルーター
//!
//! 正規化済みリクエストのパスを見て、対応するサービスに委譲する。
//! 一致するルートがなければディスカバリドキュメントを返す。

use crate::services::{Calculator, EchoService, LlmService};
use serve_ingress_common::protocol::{JsonObject, Reply, DISCOVERY_MESSAGE};
use std::collections::BTreeMap;
use tracing::debug;

/// LLMサービス未登録時のエラーメッセージ
pub const LLM_UNAVAILABLE: &str = "LLM service not available";

/// トランスポート境界で一度だけ正規化されたリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct IngressRequest {
    /// HTTPメソッド（大文字）
    pub method: String,
    /// URLパス
    pub path: String,
    /// JSONボディ（POST以外は `None`）
    pub body: Option<JsonObject>,
}

impl IngressRequest {
    /// 生のボディからリクエストを組み立てる
    ///
    /// POSTの場合のみボディをJSONとして解釈する。解釈できない場合や
    /// オブジェクトでない場合は空のマッピングとして扱い、エラーにはしない。
    pub fn from_parts(method: impl Into<String>, path: impl Into<String>, raw_body: &[u8]) -> Self {
        let method: String = method.into();
        let method = method.to_ascii_uppercase();
        let body = if method == "POST" {
            Some(parse_body(raw_body))
        } else {
            None
        };
        Self {
            method,
            path: path.into(),
            body,
        }
    }
}

fn parse_body(raw: &[u8]) -> JsonObject {
    match serde_json::from_slice::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => map,
        Ok(other) => {
            debug!("Request body is not a JSON object ({}); treating as empty", other);
            JsonObject::new()
        }
        Err(e) => {
            debug!("Request body is not valid JSON ({}); treating as empty", e);
            JsonObject::new()
        }
    }
}

/// ルーティング先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/echo`
    Echo,
    /// `/calc`
    Calc,
    /// `/llm`
    Llm,
    /// 一致なし
    Discovery,
}

impl Route {
    /// パスからルートを決定する
    ///
    /// 末尾のスラッシュを取り除いた上で、プレフィックスに完全一致するか
    /// `<prefix>/` で始まる場合のみ一致とみなす（`/calculator` は `/calc` に一致しない）。
    pub fn resolve(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        let matches = |prefix: &str| {
            path == prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'))
        };

        if matches("/echo") {
            Self::Echo
        } else if matches("/calc") {
            Self::Calc
        } else if matches("/llm") {
            Self::Llm
        } else {
            Self::Discovery
        }
    }
}

/// Ingressルーター
///
/// LLMサービスは起動時に一度だけ決まる `Option` スロット。
#[derive(Debug, Clone, Default)]
pub struct Ingress {
    echo: EchoService,
    calculator: Calculator,
    llm: Option<LlmService>,
}

impl Ingress {
    /// ルーターを作成する
    pub fn new(echo: EchoService, calculator: Calculator, llm: Option<LlmService>) -> Self {
        Self {
            echo,
            calculator,
            llm,
        }
    }

    /// LLMサービスが登録されているか
    pub fn llm_available(&self) -> bool {
        self.llm.is_some()
    }

    /// リクエストを処理する
    pub async fn handle(&self, request: &IngressRequest) -> Reply {
        let route = Route::resolve(&request.path);
        debug!(method = %request.method, path = %request.path, ?route, "Dispatching request");

        let body = request.body.as_ref();
        let reply = match route {
            Route::Echo => self.echo.handle(body),
            Route::Calc => self.calculator.handle(body),
            Route::Llm => match &self.llm {
                Some(llm) => llm.handle(body).await,
                None => Reply::error(LLM_UNAVAILABLE),
            },
            Route::Discovery => discovery_document(),
        };
        if reply.is_error() {
            debug!(path = %request.path, ?route, ?reply, "Request rejected at payload level");
        }
        reply
    }
}

/// 利用可能なエンドポイント一覧
pub fn discovery_document() -> Reply {
    let available_endpoints = BTreeMap::from([
        (
            "/echo".to_string(),
            "Echo service - POST with {'message': 'your message'}".to_string(),
        ),
        (
            "/calc".to_string(),
            "Calculator - POST with {'operation': 'add', 'a': 1, 'b': 2}".to_string(),
        ),
        (
            "/llm".to_string(),
            "LLM service - POST with {'prompt': 'your prompt'} or {'messages': [...]}"
                .to_string(),
        ),
    ]);
    Reply::Discovery {
        message: DISCOVERY_MESSAGE.to_string(),
        available_endpoints,
    }
}
