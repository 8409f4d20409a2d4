//! 通信プロトコル定義
//!
//! Ingressが受け付けるリクエストボディと、返却するJSONエンベロープ

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// JSONオブジェクト（リクエストボディ）
pub type JsonObject = serde_json::Map<String, Value>;

/// Echoサービス名
pub const ECHO_SERVICE_NAME: &str = "EchoService";

/// Calculatorサービス名
pub const CALCULATOR_SERVICE_NAME: &str = "Calculator";

/// ディスカバリドキュメントのメッセージ
pub const DISCOVERY_MESSAGE: &str = "Ray Serve Application";

/// 計算オペレーション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalcOperation {
    /// a + b
    Add,
    /// a - b
    Subtract,
    /// a * b
    Multiply,
    /// a / b
    Divide,
}

impl CalcOperation {
    /// オペレーション名から変換する（未知の名前は `None`）
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            "multiply" => Some(Self::Multiply),
            "divide" => Some(Self::Divide),
            _ => None,
        }
    }

    /// ワイヤ上のオペレーション名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// 演算を実行する。ゼロ除算の場合は `None`
    pub fn checked_apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            Self::Add => Some(a + b),
            Self::Subtract => Some(a - b),
            Self::Multiply => Some(a * b),
            Self::Divide if b == 0.0 => None,
            Self::Divide => Some(a / b),
        }
    }
}

impl fmt::Display for CalcOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// チャットロール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    /// システムプロンプト
    System,
    /// ユーザー発話
    User,
    /// アシスタント発話
    Assistant,
}

impl ChatRole {
    /// ロール名から変換する（未知のロールは `None`）
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// プロンプトに埋め込むラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// OpenAI形式のチャットメッセージ
///
/// `content` は `null`（アシスタントのtool呼び出し等）や文字列以外も受け付ける。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// ロール（省略時は "user"）
    #[serde(default = "default_role", deserialize_with = "lenient_text")]
    pub role: String,
    /// 本文（`null` は空文字列、文字列以外はJSON表記）
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
}

fn default_role() -> String {
    "user".to_string()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// LLMに渡すプロンプト
#[derive(Debug, Clone, PartialEq)]
pub enum ChatPrompt {
    /// 生のプロンプト文字列
    Text(String),
    /// チャットメッセージ列
    Messages(Vec<ChatMessage>),
}

impl ChatPrompt {
    /// 単一のプロンプト文字列に変換する
    ///
    /// メッセージ列は `"<Role>: <content>"` を改行で連結する。
    /// system / user / assistant 以外のロールは読み飛ばす。
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Messages(messages) => messages
                .iter()
                .filter_map(|msg| {
                    ChatRole::parse(&msg.role)
                        .map(|role| format!("{}: {}", role.label(), msg.content))
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// 生成パラメータ
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GenerationParams {
    /// 最大生成トークン数 (デフォルト: 100)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// サンプリング温度 (デフォルト: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_max_tokens() -> u32 {
    100
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// レスポンスエンベロープ
///
/// すべてHTTP 200で返却される。失敗は `error` キーの有無で判別する。
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Reply {
    /// Echo結果
    Echo {
        /// 受け取ったメッセージ
        echo: Value,
        /// サービス名
        service: String,
    },
    /// 計算結果
    Calculation {
        /// オペレーション名
        operation: CalcOperation,
        /// 左オペランド
        a: f64,
        /// 右オペランド
        b: f64,
        /// 計算結果
        result: f64,
        /// サービス名
        service: String,
    },
    /// LLM生成結果
    Completion {
        /// 解決済みプロンプト
        prompt: String,
        /// 生成テキスト
        response: String,
        /// サービス名
        service: String,
    },
    /// 利用方法のヒント
    Usage {
        /// ヒントメッセージ
        message: String,
        /// サービス名
        service: String,
    },
    /// ペイロードレベルのエラー
    Error {
        /// エラーメッセージ
        error: String,
        /// サービス名（ルーター起因・一部の計算エラーでは省略）
        #[serde(skip_serializing_if = "Option::is_none")]
        service: Option<String>,
    },
    /// ディスカバリドキュメント
    Discovery {
        /// アプリケーション名
        message: String,
        /// パス → 説明
        available_endpoints: BTreeMap<String, String>,
    },
}

impl Reply {
    /// サービス名なしのエラー
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
            service: None,
        }
    }

    /// サービス名付きのエラー
    pub fn service_error(message: impl Into<String>, service: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
            service: Some(service.into()),
        }
    }

    /// 利用方法のヒント
    pub fn usage(message: impl Into<String>, service: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            service: service.into(),
        }
    }

    /// `error` キーを持つか
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
