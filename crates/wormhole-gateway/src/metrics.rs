use axum::http::StatusCode;
use std::sync::atomic::{AtomicU16, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// What one response actually put on the wire.
///
/// The status is recorded once the response head is known, the byte
/// count grows with every body frame handed to the transport. When the
/// body is gzip-encoded the count is of compressed bytes.
#[derive(Debug, Default)]
pub struct ResponseMetrics {
    status: AtomicU16,
    bytes_written: AtomicU64,
}

impl ResponseMetrics {
    pub fn record_status(&self, status: StatusCode) {
        self.status.store(status.as_u16(), Ordering::Relaxed);
    }

    pub fn record_bytes(&self, len: usize) {
        self.bytes_written.fetch_add(len as u64, Ordering::Relaxed);
    }

    /// The recorded status code, `0` before one was recorded.
    pub fn status(&self) -> u16 {
        self.status.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

/// Emits the response summary event when dropped.
///
/// Owned by the response body, so the event fires once the body has been
/// fully sent, or abandoned, with the final metrics.
#[derive(Debug)]
pub struct ResponseLog {
    metrics: Arc<ResponseMetrics>,
    started: Instant,
}

impl ResponseLog {
    pub fn new(metrics: Arc<ResponseMetrics>, started: Instant) -> Self {
        Self { metrics, started }
    }

    pub fn metrics(&self) -> &ResponseMetrics {
        &self.metrics
    }
}

impl Drop for ResponseLog {
    fn drop(&mut self) {
        info!(
            status = self.metrics.status(),
            size = self.metrics.bytes_written(),
            duration = ?self.started.elapsed(),
            "response sent"
        );
    }
}
