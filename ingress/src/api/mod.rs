//! HTTPハンドラー
//!
//! すべてのリクエストをフォールバックハンドラーで受け、`IngressRequest` に
//! 正規化してから `Ingress` に渡す。パスによる振り分けは `Ingress` 側で行う。

use crate::ingress::IngressRequest;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{Method, Uri},
    Json, Router,
};
use serve_ingress_common::protocol::Reply;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// リクエストボディの上限 (2 MiB)
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// アプリケーションルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 任意のパス・メソッド - Ingressへ委譲
///
/// 業務エラーもペイロードの `error` で表現するため、常に200を返す。
/// 上限超過などでボディを読み取れなかった場合も同じエンベロープで返す。
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Json<Reply> {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(path = %uri.path(), "Failed to read request body: {}", rejection);
            return Json(Reply::error(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )));
        }
    };
    let request = IngressRequest::from_parts(method.as_str(), uri.path(), &body);
    Json(state.ingress.handle(&request).await)
}
