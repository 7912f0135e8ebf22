use crate::encoding::GzipHeaderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};
use wormhole_core::ShortenerError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Every way a request can fail, mapped onto the status and plain-text
/// body the client receives.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no route for method and path")]
    InvalidRoute,
    #[error("short code not found")]
    UnknownShortCode,
    #[error("request body unreadable: {0}")]
    UnreadableBody(String),
    #[error("malformed shorten request: {0}")]
    MalformedDocument(String),
    #[error("shorten response not serializable: {0}")]
    Unserializable(String),
    #[error("cannot open gzip request body: {0}")]
    GzipReader(#[from] GzipHeaderError),
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidRoute => (StatusCode::BAD_REQUEST, "Invalid URL"),
            AppError::UnknownShortCode => (StatusCode::BAD_REQUEST, "Invalid URL for GET"),
            AppError::UnreadableBody(_) => (StatusCode::BAD_REQUEST, "Invalid URL for POST"),
            AppError::MalformedDocument(_) => (StatusCode::BAD_REQUEST, ""),
            AppError::Unserializable(_) => (StatusCode::BAD_REQUEST, "Unmarshable data"),
            AppError::GzipReader(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error creating gzip reader",
            ),
            AppError::Shortener(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            debug!(error = %self, "rejecting request");
        }
        (status, body).into_response()
    }
}
