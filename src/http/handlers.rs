//! Axum HTTP handlers for the web server
//!
//! Provides the Autodiscover endpoint and the health probe.

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::debug;

use crate::autodiscover::{decode, respond, XML_CONTENT_TYPE};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn autodiscover(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let request = decode(&body).map_err(|err| {
        debug!(error = %err, "failed to decode autodiscover request");
        AppError::malformed_request(err.to_string())
    })?;

    let document = respond(&request, &state.service).inspect_err(|err| {
        debug!(error = %err, "no response schema matched");
    })?;
    debug!(schema = document.schema().as_uri(), "rendering autodiscover response");

    let xml = document.render()?;
    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}
