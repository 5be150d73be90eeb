use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use thiserror::Error;

use crate::autodiscover::{render_error, ErrorKind, XML_CONTENT_TYPE};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("malformed request: {message}")]
    MalformedRequest { message: String },
    #[error("unsupported response schema: {schema:?}")]
    UnsupportedSchema { schema: String },
    #[error("internal error")]
    Internal { message: String },
}

impl AppError {
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn unsupported_schema(schema: impl Into<String>) -> Self {
        Self::UnsupportedSchema {
            schema: schema.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedRequest { .. } | Self::UnsupportedSchema { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedRequest { .. } => ErrorKind::InvalidRequest,
            Self::UnsupportedSchema { .. } => ErrorKind::ProviderUnavailable,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message } = &self {
            tracing::error!(error = %message, "request failed with internal error");
        }

        (
            self.status(),
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            render_error(self.kind(), Utc::now()),
        )
            .into_response()
    }
}
