use crate::Result;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::trace;
use wormhole_core::{ReadRepository, Repository, ShortCode};

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap provides better concurrency than RwLock<HashMap> because it
/// uses sharded locks, allowing concurrent reads and writes to different
/// buckets without blocking. A shard lock is only held for the duration
/// of a single lookup or insert.
///
/// Entries live as long as the repository; there is no eviction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Returns the number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl<C, U> FromIterator<(C, U)> for InMemoryRepository
where
    C: Into<String>,
    U: Into<String>,
{
    /// Builds a repository pre-seeded with the given `(code, url)` pairs.
    fn from_iter<T: IntoIterator<Item = (C, U)>>(iter: T) -> Self {
        Self {
            storage: iter
                .into_iter()
                .map(|(code, url)| (code.into(), url.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.storage.contains_key(code.as_str()))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: String) -> Result<()> {
        if let Some(previous) = self.storage.insert(code.as_str().to_owned(), original_url) {
            trace!(code = %code, previous = %previous, "overwrote existing mapping");
        }
        Ok(())
    }

    async fn insert_if_absent(&self, code: &ShortCode, original_url: String) -> Result<bool> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(vacant) => {
                vacant.insert(original_url);
                Ok(true)
            }
        }
    }
}
