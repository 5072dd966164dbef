//! Plain-text rendering of the result grid, pagination controls and
//! favorites list.

use bookfinder_client::{CoverSize, SearchState, cover_url};
use bookfinder_storage::FavoritesStore;
use bookfinder_types::{BookSummary, FavoriteRecord};

/// Render the whole result panel: loading line, inline error, match
/// count, the visible page of books and the pagination controls.
pub fn render_results(state: &SearchState, favorites: &FavoritesStore, page: u32) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading...\n");
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("⚠ {error}\n"));
    }

    out.push_str(&format!("{} results\n", state.results.num_found));

    for (index, book) in state.results.docs.iter().enumerate() {
        out.push('\n');
        out.push_str(&book_entry(index + 1, book, favorites.contains(&book.key)));
    }

    out.push('\n');
    out.push_str(&pagination_line(page, state.total_pages()));
    out
}

pub fn book_entry(position: usize, book: &BookSummary, is_favorite: bool) -> String {
    let marker = if is_favorite { '★' } else { '☆' };
    let authors = if book.author_name.is_empty() {
        "Unknown".to_string()
    } else {
        book.author_name.join(", ")
    };
    let year = book
        .first_publish_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".to_string());

    format!(
        "{position:3}. {marker} {}\n     {}\n     {} • {} ed.\n     {}\n",
        book.title,
        authors,
        year,
        book.edition_count,
        cover_url(book.cover_i, CoverSize::Medium)
    )
}

pub fn pagination_line(page: u32, total_pages: u64) -> String {
    let prev = if page > 1 {
        "prev available"
    } else {
        "prev disabled"
    };
    let next = if (page as u64) < total_pages {
        "next available"
    } else {
        "next disabled"
    };
    format!("Page {page} / {total_pages}  ({prev}, {next})")
}

pub fn favorite_entry(position: usize, record: &FavoriteRecord) -> String {
    let authors = if record.author_name.is_empty() {
        "Unknown".to_string()
    } else {
        record.author_name.join(", ")
    };
    let year = record
        .first_publish_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "—".to_string());

    format!(
        "{position:3}. ★ {} ({year})\n     {}\n     key: {}\n",
        record.title, authors, record.key
    )
}
