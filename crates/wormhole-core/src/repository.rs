use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a repository.
///
/// This trait provides only the read operations from [`Repository`],
/// allowing the resolve path to hold read-only access.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the original URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Checks whether a short code already exists in the repository.
    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores `original_url` under `code`, replacing any previous mapping.
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<()>;

    /// Stores `original_url` under `code` only if the code is still free.
    ///
    /// Returns `false` without touching the stored value when the code is taken.
    /// The check and the insert happen atomically.
    async fn insert_if_absent(&self, code: &ShortCode, original_url: String) -> Result<bool>;
}
