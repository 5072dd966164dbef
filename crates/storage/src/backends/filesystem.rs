//! Filesystem-based storage backend implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bookfinder_types::FavoriteRecord;
use tokio::fs;

use crate::error::{FavoritesError, Result};
use crate::traits::FavoriteStorage;

/// File name the favorites list is stored under, matching the durable
/// storage key `bf_favorites`.
pub const FAVORITES_FILE: &str = "bf_favorites.json";

/// Filesystem-based storage backend.
///
/// Stores the favorites list as a single JSON array at
/// `{root_path}/bf_favorites.json`, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct FilesystemStorage {
    root_path: PathBuf,
}

impl FilesystemStorage {
    /// Create a new filesystem storage backend rooted at the given
    /// directory.
    pub fn new<P: AsRef<Path>>(root_path: P) -> Self {
        Self {
            root_path: root_path.as_ref().to_path_buf(),
        }
    }

    fn favorites_path(&self) -> PathBuf {
        self.root_path.join(FAVORITES_FILE)
    }
}

#[async_trait]
impl FavoriteStorage for FilesystemStorage {
    async fn load(&self) -> Result<Vec<FavoriteRecord>> {
        let path = self.favorites_path();

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            // No file yet is a normal first run.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(FavoritesError::BackendError {
                    source: Some(eyre::eyre!(
                        "failed to read {}: {}",
                        path.display(),
                        err
                    )),
                });
            }
        };

        serde_json::from_str(&content).map_err(|err| FavoritesError::Corrupt {
            source: Some(eyre::eyre!("invalid JSON in {}: {}", path.display(), err)),
        })
    }

    async fn save(&self, favorites: &[FavoriteRecord]) -> Result<()> {
        fs::create_dir_all(&self.root_path).await.map_err(|err| {
            FavoritesError::StorageOperationFailed {
                operation: "create favorites directory".to_string(),
                source: Some(eyre::eyre!(
                    "failed to create {}: {}",
                    self.root_path.display(),
                    err
                )),
            }
        })?;

        let content = serde_json::to_string_pretty(favorites).map_err(|err| {
            FavoritesError::StorageOperationFailed {
                operation: "serialize favorites".to_string(),
                source: Some(eyre::eyre!("JSON error: {}", err)),
            }
        })?;

        let path = self.favorites_path();
        fs::write(&path, content)
            .await
            .map_err(|err| FavoritesError::StorageOperationFailed {
                operation: "write favorites file".to_string(),
                source: Some(eyre::eyre!("failed to write {}: {}", path.display(), err)),
            })
    }
}
