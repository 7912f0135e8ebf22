mod gatekeeper;

pub use gatekeeper::{gatekeeper, Route};
