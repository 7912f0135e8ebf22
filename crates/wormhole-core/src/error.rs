use thiserror::Error;

/// Errors related to the core functionality of the URL shortener service.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Errors reported by a repository backend.
///
/// The in-memory backend cannot fail, so there is nothing to report yet.
#[derive(Debug, Clone, Error)]
#[error("storage error")]
pub enum StorageError {}

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("no free short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
