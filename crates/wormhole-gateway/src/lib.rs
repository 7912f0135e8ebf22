//! HTTP gateway for the Wormhole URL shortener.
//!
//! Every request passes through the [`gatekeeper`](middleware::gatekeeper)
//! middleware, which validates the method and path, negotiates gzip for
//! both directions and logs a request and a response event, before one of
//! the [`handlers`] talks to the shortener service.

pub mod app;
pub mod encoding;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
