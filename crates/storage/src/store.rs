//! The favorites list and its single mutation path.

use std::sync::Arc;

use bookfinder_types::{BookSummary, FavoriteRecord};
use tracing::warn;

use crate::error::Result;
use crate::traits::FavoriteStorage;

/// Maximum number of favorites retained; the oldest entry is evicted
/// when a new favorite would overflow the cap.
pub const FAVORITES_CAP: usize = 100;

/// Ordered, key-deduplicated favorites list backed by a
/// [`FavoriteStorage`] implementation.
///
/// Entries are kept newest-first, mutated only by [`toggle`], and the
/// full collection is written through the backend on every mutation.
///
/// [`toggle`]: FavoritesStore::toggle
pub struct FavoritesStore {
    backend: Arc<dyn FavoriteStorage>,
    entries: Vec<FavoriteRecord>,
}

impl FavoritesStore {
    /// Load the favorites list once at startup.
    ///
    /// Absent or corrupt stored state recovers silently to an empty
    /// list; the failure is logged but never surfaced to the caller.
    pub async fn open(backend: Arc<dyn FavoriteStorage>) -> Self {
        let entries = match backend.load().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!("failed to load favorites, starting with an empty list: {err}");
                Vec::new()
            }
        };

        Self { backend, entries }
    }

    /// Toggle a book's membership in the favorites list.
    ///
    /// A book already present (by key) is removed; otherwise its compact
    /// projection is prepended and the list is truncated to
    /// [`FAVORITES_CAP`] entries. Returns `true` when the book was
    /// added, `false` when it was removed.
    pub async fn toggle(&mut self, book: &BookSummary) -> Result<bool> {
        let added = match self.entries.iter().position(|f| f.key == book.key) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.insert(0, FavoriteRecord::from(book));
                self.entries.truncate(FAVORITES_CAP);
                true
            }
        };

        self.backend.save(&self.entries).await?;
        Ok(added)
    }

    /// Membership test by key; a linear scan is fine at this scale.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|f| f.key == key)
    }

    pub fn entries(&self) -> &[FavoriteRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
