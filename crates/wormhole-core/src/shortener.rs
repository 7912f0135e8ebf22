use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Registers `original_url` and returns the short code it is reachable under.
    async fn shorten(&self, original_url: String) -> Result<ShortCode>;

    /// Resolves a short code to the original URL.
    /// Returns `None` if the code does not exist.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;
}
