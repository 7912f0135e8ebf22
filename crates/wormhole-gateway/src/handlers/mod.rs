mod url;

pub use url::{
    create_url_handler, fallback_handler, resolve_url_handler, shorten_url_handler,
    MAX_BODY_BYTES,
};
