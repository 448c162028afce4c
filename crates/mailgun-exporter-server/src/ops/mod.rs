//! Operational HTTP endpoints.
//!
//! - `/`            : index with links
//! - `/healthz`     : liveness (204, no body)
//! - metrics path   : Prometheus text format, collected on demand

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::app_state::AppState;
use crate::obs::metrics::Exposition;

pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.index_html().to_string())
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Domain failures surface in the samples, never as an HTTP error.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let report = state.collector().collect().await;
    let scrapes = state.record_scrape();
    let process = state.process().snapshot();
    let body = Exposition::from_report(&report)
        .with_self_metrics(scrapes, process.as_ref())
        .render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
