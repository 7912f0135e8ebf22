use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use wormhole_core::ShortCode;
use wormhole_generator::RandomGenerator;
use wormhole_shortener::ShortenerService;
use wormhole_storage::InMemoryRepository;

use crate::handlers::{
    create_url_handler, fallback_handler, resolve_url_handler, shorten_url_handler,
};
use crate::middleware::gatekeeper;
use crate::state::AppState;

/// Path of the JSON create endpoint.
pub const SHORTEN_PATH: &str = "/api/shorten";

/// Mappings every fresh in-memory store starts with.
pub const SEED_ENTRIES: [(&str, &str); 1] = [("sharaga", "https://mai.ru")];

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", post(create_url_handler))
            .route(SHORTEN_PATH, post(shorten_url_handler))
            .route("/{code}", get(resolve_url_handler))
            .fallback(fallback_handler)
            .layer(from_fn(gatekeeper))
            .with_state(state)
    }

    /// Builds the router over a seeded in-memory store.
    ///
    /// With `fixed_code` set every create is stored under that code,
    /// otherwise codes come from `generator`.
    pub fn in_memory(generator: RandomGenerator, fixed_code: Option<ShortCode>) -> Router {
        let repository: InMemoryRepository = SEED_ENTRIES.into_iter().collect();
        let service = ShortenerService::new(repository, generator);
        let service = match fixed_code {
            Some(code) => service.with_fixed_code(code),
            None => service,
        };
        Self::router(AppState::new(Arc::new(service)))
    }
}
