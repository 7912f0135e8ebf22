pub mod memory;

pub use memory::InMemoryRepository;
pub use wormhole_core::repository::Result;
pub use wormhole_core::{ReadRepository, Repository, StorageError};
