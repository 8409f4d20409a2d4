//! Serve Ingress Server
//!
//! echo / calc / llm の各サービスへパスで振り分ける単一のHTTPエントリポイント

#![warn(missing_docs)]

/// HTTPハンドラー
pub mod api;

/// サーバー初期化（アプリケーション組み立て）
pub mod bootstrap;

/// CLIインターフェース
pub mod cli;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// 推論エンジン抽象とOpenAI互換クライアント
pub mod engine;

/// エラー型
pub mod error;

/// Ingressルーター
pub mod ingress;

/// ロギング初期化ユーティリティ
pub mod logging;

/// axumサーバー起動
pub mod server;

/// バックエンドサービス（Echo / Calculator / LLM）
pub mod services;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone, Debug)]
pub struct AppState {
    /// Ingressルーター
    pub ingress: Arc<ingress::Ingress>,
}

impl AppState {
    /// ルーターから状態を作成する
    pub fn new(ingress: ingress::Ingress) -> Self {
        Self {
            ingress: Arc::new(ingress),
        }
    }
}
