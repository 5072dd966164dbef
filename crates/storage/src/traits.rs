//! Trait definitions for the favorites storage system.

use async_trait::async_trait;
use bookfinder_types::FavoriteRecord;

use crate::error::Result;

/// Backend interface for persisting the favorites list.
///
/// Implementations store the whole ordered sequence; there is no
/// incremental diffing, every save rewrites the full collection. The
/// production backend is [`crate::FilesystemStorage`]; tests and
/// ephemeral sessions use [`crate::MemoryStorage`].
#[async_trait]
pub trait FavoriteStorage: Send + Sync {
    /// Load the stored favorites sequence.
    ///
    /// An absent store is a normal first run and yields an empty
    /// sequence; unreadable or unparsable data is an error the caller
    /// may choose to recover from.
    async fn load(&self) -> Result<Vec<FavoriteRecord>>;

    /// Replace the stored favorites sequence with the given one.
    async fn save(&self, favorites: &[FavoriteRecord]) -> Result<()>;
}
