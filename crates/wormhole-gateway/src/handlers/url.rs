use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::body::{to_bytes, Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use wormhole_core::ShortCode;

/// Upper bound on a (decoded) request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// `GET /{code}`: redirects to the stored URL.
pub async fn resolve_url_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    let code = ShortCode::new(code).map_err(|_| AppError::UnknownShortCode)?;
    let original_url = state
        .shortener()
        .resolve(&code)
        .await?
        .ok_or(AppError::UnknownShortCode)?;

    // Stored URLs are opaque; one that cannot travel in a header is unusable.
    let location = HeaderValue::try_from(original_url).map_err(|_| AppError::UnknownShortCode)?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response())
}

/// `POST /`: the raw body is the URL, the reply is the request path plus the code.
pub async fn create_url_handler(
    State(state): State<AppState>,
    uri: Uri,
    body: Body,
) -> Result<Response> {
    let bytes = read_body(body)
        .await
        .map_err(|err| AppError::UnreadableBody(err.to_string()))?;
    let original_url =
        String::from_utf8(bytes.to_vec()).map_err(|err| AppError::UnreadableBody(err.to_string()))?;

    let code = state.shortener().shorten(original_url).await?;
    Ok((StatusCode::CREATED, format!("{}{}", uri.path(), code)).into_response())
}

/// `POST /api/shorten`: `{"url": ...}` in, `{"result": code}` out.
pub async fn shorten_url_handler(State(state): State<AppState>, body: Body) -> Result<Response> {
    let bytes = read_body(body)
        .await
        .map_err(|err| AppError::MalformedDocument(err.to_string()))?;
    // Only the first document counts; anything after it is ignored.
    let request = serde_json::Deserializer::from_slice(&bytes)
        .into_iter::<ShortenRequest>()
        .next()
        .ok_or_else(|| AppError::MalformedDocument("empty body".to_string()))?
        .map_err(|err| AppError::MalformedDocument(err.to_string()))?;

    let code = state.shortener().shorten(request.url).await?;
    let document = ShortenResponse {
        result: code.to_string(),
    }
    .to_pretty_json()
    .map_err(|err| AppError::Unserializable(err.to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        document,
    )
        .into_response())
}

/// Anything the router cannot place.
pub async fn fallback_handler() -> AppError {
    AppError::InvalidRoute
}

async fn read_body(body: Body) -> std::result::Result<Bytes, axum::Error> {
    to_bytes(body, MAX_BODY_BYTES).await
}
