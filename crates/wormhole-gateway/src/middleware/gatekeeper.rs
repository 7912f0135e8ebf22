use crate::app::SHORTEN_PATH;
use crate::encoding::{mentions_gzip, GzipDecodedBody, GzipHeaderError, MeteredBody, GZIP};
use crate::error::AppError;
use crate::metrics::{ResponseLog, ResponseMetrics};
use axum::body::Body;
use axum::extract::Request;
use axum::http::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, VARY};
use axum::http::{HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// The endpoints a request may be dispatched to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /{code}`
    Resolve,
    /// `POST /`
    Create,
    /// `POST /api/shorten`
    Shorten,
}

impl Route {
    /// Matches method and path against the accepted shapes.
    ///
    /// A resolve path is exactly one segment of `[a-zA-Z0-9-]`, so
    /// `/{code}/extra` never reaches the resolve handler.
    pub fn classify(method: &Method, path: &str) -> Option<Self> {
        match (method, path) {
            (&Method::GET, path) if is_code_path(path) => Some(Route::Resolve),
            (&Method::POST, "/") => Some(Route::Create),
            (&Method::POST, SHORTEN_PATH) => Some(Route::Shorten),
            _ => None,
        }
    }
}

fn is_code_path(path: &str) -> bool {
    path.strip_prefix('/').is_some_and(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

/// Wraps every request.
///
/// Logs the request, negotiates gzip in both directions, rejects anything
/// [`Route::classify`] does not accept and routes every response, including
/// rejections, through one [`MeteredBody`] whose [`ResponseLog`] reports the
/// final status, size and duration.
///
/// A gzip request body whose header cannot be read fails with a 500 before
/// the route is looked at.
pub async fn gatekeeper(mut request: Request, next: Next) -> Response {
    let started = Instant::now();
    info!(uri = %request.uri(), method = %request.method(), "request received");

    let compress = mentions_gzip(request.headers(), ACCEPT_ENCODING);
    let log = ResponseLog::new(Arc::new(ResponseMetrics::default()), started);

    if mentions_gzip(request.headers(), CONTENT_ENCODING) {
        if let Err(err) = decode_request_body(&mut request).await {
            return finish_response(AppError::from(err).into_response(), compress, log);
        }
    }

    let response = match Route::classify(request.method(), request.uri().path()) {
        Some(route) => {
            debug!(?route, "dispatching request");
            next.run(request).await
        }
        None => AppError::InvalidRoute.into_response(),
    };

    finish_response(response, compress, log)
}

async fn decode_request_body(request: &mut Request) -> Result<(), GzipHeaderError> {
    let body = std::mem::take(request.body_mut());
    let decoded = GzipDecodedBody::open(body).await?;

    let headers = request.headers_mut();
    headers.remove(CONTENT_ENCODING);
    headers.remove(CONTENT_LENGTH);
    *request.body_mut() = Body::new(decoded);
    Ok(())
}

fn finish_response(response: Response, compress: bool, log: ResponseLog) -> Response {
    log.metrics().record_status(response.status());

    let (mut parts, body) = response.into_parts();
    if compress {
        parts
            .headers
            .insert(CONTENT_ENCODING, HeaderValue::from_static(GZIP));
        parts.headers.remove(CONTENT_LENGTH);
        parts
            .headers
            .append(VARY, HeaderValue::from_static("accept-encoding"));
    }

    Response::from_parts(parts, Body::new(MeteredBody::new(body, compress, log)))
}
