//! テスト共通ユーティリティ
