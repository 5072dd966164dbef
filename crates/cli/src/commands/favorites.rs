use bookfinder_storage::FavoritesStore;
use bookfinder_types::BookSummary;
use eyre::Result;

use crate::cli::FavoritesCommands;
use crate::render::favorite_entry;

pub async fn handle_favorites_command(
    cmd: FavoritesCommands,
    favorites: &mut FavoritesStore,
    dry_run: bool,
) -> Result<()> {
    match cmd {
        FavoritesCommands::List => handle_list_favorites(favorites),
        FavoritesCommands::Remove { key } => handle_remove_favorite(key, favorites, dry_run).await,
    }
}

fn handle_list_favorites(favorites: &FavoritesStore) -> Result<()> {
    if favorites.is_empty() {
        println!("No favorites yet");
        println!("💡 Toggle one from a browse session with: fav <n>");
        return Ok(());
    }

    println!("Favorites ({}):", favorites.len());
    for (index, record) in favorites.entries().iter().enumerate() {
        println!("{}", favorite_entry(index + 1, record));
    }
    Ok(())
}

async fn handle_remove_favorite(
    key: String,
    favorites: &mut FavoritesStore,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        println!("Would remove favorite: {key}");
        return Ok(());
    }

    let record = favorites.entries().iter().find(|f| f.key == key).cloned();
    match record {
        Some(record) => {
            // Toggle is the only mutation path; rebuild a summary from
            // the stored projection and toggle it off.
            let book = BookSummary::from(&record);
            favorites.toggle(&book).await?;
            println!("☆ Removed from favorites: {}", record.title);
        }
        None => {
            println!("❌ No favorite with key: {key}");
            println!("💡 Use 'bookfinder favorites list' to see stored keys");
        }
    }
    Ok(())
}
