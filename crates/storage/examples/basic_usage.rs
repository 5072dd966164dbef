//! Minimal favorites workflow against a temporary directory.
//!
//! Run with: cargo run -p bookfinder_storage --example basic_usage

use std::sync::Arc;

use bookfinder_storage::{FavoritesStore, FilesystemStorage};
use bookfinder_types::BookSummary;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    let root = std::env::temp_dir().join("bookfinder-example");
    let backend = Arc::new(FilesystemStorage::new(&root));
    let mut favorites = FavoritesStore::open(backend).await;

    let dune = BookSummary {
        key: "/works/OL893415W".to_string(),
        title: "Dune".to_string(),
        author_name: vec!["Frank Herbert".to_string()],
        first_publish_year: Some(1965),
        edition_count: 120,
        cover_i: Some(11481354),
        language: vec!["eng".to_string()],
        isbn: vec![],
    };

    let added = favorites.toggle(&dune).await?;
    println!("added: {added}, stored at {}", root.display());

    for record in favorites.entries() {
        println!("★ {} ({:?})", record.title, record.first_publish_year);
    }

    favorites.toggle(&dune).await?;
    println!("removed again, {} favorites left", favorites.len());

    Ok(())
}
