//! Serve Ingress Common Library
//!
//! Ingressサーバーとテストで共有する型定義

#![warn(missing_docs)]

/// 設定構造体
pub mod config;

/// リクエスト / レスポンスのワイヤ型
pub mod protocol;
