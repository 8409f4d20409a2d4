//! Echoサービス

use serve_ingress_common::protocol::{JsonObject, Reply, ECHO_SERVICE_NAME};
use serde_json::Value;

/// `message` 未指定時に返す挨拶
pub const DEFAULT_GREETING: &str = "Hello from Ray Serve!";

const USAGE: &str = "Send a POST request with a 'message' field";

/// 受け取ったメッセージをそのまま返すサービス
#[derive(Debug, Clone)]
pub struct EchoService {
    service_name: String,
}

impl Default for EchoService {
    fn default() -> Self {
        Self {
            service_name: ECHO_SERVICE_NAME.to_string(),
        }
    }
}

impl EchoService {
    /// リクエストを処理する。ボディがない場合は利用方法を返す
    pub fn handle(&self, body: Option<&JsonObject>) -> Reply {
        let Some(body) = body else {
            return Reply::usage(USAGE, self.service_name.as_str());
        };

        let message = body
            .get("message")
            .cloned()
            .unwrap_or_else(|| Value::String(DEFAULT_GREETING.to_string()));

        Reply::Echo {
            echo: message,
            service: self.service_name.clone(),
        }
    }
}
