use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use trainview_core::{SourceError, SyncGateway};

use crate::constants::webhook;
use crate::webhook::WebhookClient;

/// Shared state for the route handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<SyncGateway>,
    pub webhook: WebhookClient,
}

const INDEX_PAGE: &str = include_str!("../assets/index.html");

/// Build the application router.
///
/// Development mode drops the static page and answers with permissive CORS
/// headers so a UI served from another port can talk to this process. All
/// failures are soft: every route answers 200 with an "error" field rather
/// than an error status, and the UI decides what to show.
pub fn router(state: AppState, development: bool) -> Router {
    let mut router = Router::new()
        .route("/data", post(data))
        .route("/save", post(save))
        .route("/extract", post(extract))
        .route("/train", post(train));

    if !development {
        router = router.route("/", get(index));
    }

    let mut router = router.with_state(state);

    if development {
        router = router.layer(middleware::from_fn(cors));
    }

    router
}

async fn cors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Origin, X-Requested-With, Content-Type, Accept"),
    );
    response
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

async fn data(State(state): State<AppState>) -> Json<Value> {
    match state.gateway.fetch() {
        Ok(snapshot) => Json(json!({
            "data": snapshot.content,
            "path": snapshot.path,
        })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

async fn save(State(state): State<AppState>, Json(body): Json<Value>) -> Json<Value> {
    match state.gateway.save(body).await {
        Ok(()) => Json(json!({ "ok": true })),
        Err(SourceError::Validation { .. }) => Json(json!({ "error": "file is invalid" })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

async fn extract(State(state): State<AppState>) -> Json<Value> {
    match state.webhook.trigger(webhook::EXTRACT_PATH).await {
        Ok(resp) if WebhookClient::job_started(&resp) => {
            // The extraction job may have rewritten the file already.
            if let Err(err) = state.gateway.reload_after_job().await {
                warn!("reload after extraction failed: {err}");
            }
            Json(json!({ "ok": true }))
        }
        Ok(resp) => Json(json!({ "resp": resp })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

async fn train(State(state): State<AppState>) -> Json<Value> {
    match state.webhook.trigger(webhook::TRAIN_PATH).await {
        Ok(resp) if WebhookClient::job_started(&resp) => Json(json!({ "ok": true })),
        Ok(resp) => Json(json!({ "resp": resp })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}
