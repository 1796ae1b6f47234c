use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::error::ToxigraphError;
use crate::transport::{Credential, Fetch, InMemoryService, Post, PostOutcome};
use crate::wire;

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub error: String,
}

/// The loopback service: the in-memory store exposed over HTTP with the
/// same narrow contract the transport traits describe. GET serves the
/// stored graph as wire text, POST parses a graph and stores it under a
/// freshly minted child locator.
pub fn router(service: Arc<InMemoryService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/*locator", get(fetch_graph).post(store_graph))
        .layer(cors)
        .with_state(service)
}

fn credential_from(headers: &HeaderMap) -> Option<Credential> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(Credential::new)
}

fn failure(e: ToxigraphError) -> Response {
    let status = match &e {
        ToxigraphError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ToxigraphError::Transport {
            status: Some(404), ..
        } => StatusCode::NOT_FOUND,
        ToxigraphError::Syntax { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let msg = format!("{e}");
    warn!(%msg, code = %status.as_u16(), "request failed");
    (
        status,
        Json(ErrorBody {
            status: "error".into(),
            error: msg,
        }),
    )
        .into_response()
}

async fn fetch_graph(
    State(service): State<Arc<InMemoryService>>,
    Path(locator): Path<String>,
    headers: HeaderMap,
) -> Response {
    let locator = service.base().join(&locator);
    let credential = credential_from(&headers);
    match service.fetch(&locator, credential.as_ref()) {
        Ok(graph) => {
            info!(%locator, triples = graph.len(), "graph served");
            (
                [(header::CONTENT_TYPE, "application/n-triples")],
                wire::write_graph(&graph),
            )
                .into_response()
        }
        Err(e) => failure(e),
    }
}

async fn store_graph(
    State(service): State<Arc<InMemoryService>>,
    Path(locator): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let locator = service.base().join(&locator);
    let credential = credential_from(&headers);
    let outcome = wire::read_graph(&body)
        .and_then(|graph| service.post(&locator, credential.as_ref(), &graph));
    match outcome {
        Ok(PostOutcome::Created(created)) => {
            info!(%created, "graph stored");
            (
                StatusCode::CREATED,
                [(header::LOCATION, created.to_string())],
                created.to_string(),
            )
                .into_response()
        }
        Ok(PostOutcome::Accepted(code)) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::OK)
            .into_response(),
        Err(e) => failure(e),
    }
}
