//! Route table and request handlers.
//!
//! The router is generic over the engine so tests can drive it with a
//! scripted fake instead of AWS.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::{info_span, Instrument};
use uuid::Uuid;

use catapult_engine::QueryEngine;
use catapult_proxy::QueryProxy;

/// Build the route table over a shared proxy.
pub fn router<E: QueryEngine + 'static>(proxy: Arc<QueryProxy<E>>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query", post(run_query::<E>))
        .layer(CorsLayer::permissive())
        .with_state(proxy)
}

async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Execute one SQL payload through the proxy pipeline.
///
/// The body may be any of the inherited invocation shapes: a JSON mapping
/// (direct or with the query nested under `body`), a JSON-encoded string,
/// or raw SQL text. The pipeline's envelope maps onto the HTTP response:
/// its `statusCode` becomes the status, its `body` string the response
/// body.
async fn run_query<E: QueryEngine>(
    State(proxy): State<Arc<QueryProxy<E>>>,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let payload = decode_payload(&body);

    let envelope = proxy
        .handle(&payload)
        .instrument(info_span!("query", request_id = %request_id))
        .await;

    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        envelope.body,
    )
        .into_response()
}

/// Interpret the raw body: a JSON document when it parses, the literal SQL
/// string otherwise.
fn decode_payload(body: &Bytes) -> Value {
    let text = String::from_utf8_lossy(body);
    serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text.into_owned()))
}
