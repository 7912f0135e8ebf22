//! Body decorators installed by the gatekeeper.
//!
//! [`MeteredBody`] wraps a response body, gzip-encoding it when the client
//! asked for it and counting the bytes handed to the transport.
//! [`GzipDecodedBody`] wraps a gzip-encoded request body and yields the
//! decoded bytes to the handler.

mod decoder;
mod encoder;

pub use decoder::{GzipDecodedBody, GzipHeaderError};
pub use encoder::MeteredBody;

use axum::http::{HeaderMap, HeaderName};

pub const GZIP: &str = "gzip";

/// Returns `true` if any value of header `name` mentions gzip.
pub fn mentions_gzip(headers: &HeaderMap, name: HeaderName) -> bool {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains(GZIP))
}
