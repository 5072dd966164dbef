//! Favorites storage for the bookfinder project.
//!
//! This crate provides a trait-based storage system for the persisted
//! favorites list: an ordered, key-deduplicated, size-capped sequence of
//! compact book records, written through an injectable backend on every
//! mutation.

pub mod backends;
pub mod error;
pub mod store;
pub mod traits;

// Re-export the main interface and types for easy access
pub use backends::{FilesystemStorage, MemoryStorage};
pub use error::{FavoritesError, Result};
pub use store::{FAVORITES_CAP, FavoritesStore};
pub use traits::FavoriteStorage;
