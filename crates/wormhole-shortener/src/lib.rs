//! URL shortener service implementation.
//!
//! This crate wires a [`Repository`](wormhole_core::Repository) and a
//! [`Generator`](wormhole_generator::Generator) into a
//! [`Shortener`](wormhole_core::Shortener). Core types are re-exported
//! from `wormhole_core`.

pub mod service;

pub use service::{ShortenerService, MAX_GENERATE_ATTEMPTS};
pub use wormhole_core::{ShortCode, Shortener, ShortenerError};
