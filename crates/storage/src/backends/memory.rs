//! In-memory storage backend.

use async_trait::async_trait;
use bookfinder_types::FavoriteRecord;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::traits::FavoriteStorage;

/// In-process backend with no durability.
///
/// Used as the injectable fake in tests and for ephemeral sessions that
/// should not touch the real favorites file.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Vec<FavoriteRecord>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<FavoriteRecord>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn save(&self, favorites: &[FavoriteRecord]) -> Result<()> {
        *self.entries.lock().await = favorites.to_vec();
        Ok(())
    }
}
