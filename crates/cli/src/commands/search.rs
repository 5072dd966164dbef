use bookfinder_client::{SearchClient, SearchState, build_query};
use bookfinder_storage::FavoritesStore;
use bookfinder_types::SearchParams;
use eyre::Result;
use tracing::info;

use crate::render::render_results;

/// Handle the search command: one query, one rendered result page.
pub async fn handle_search_command(
    params: SearchParams,
    page: u32,
    client: &SearchClient,
    favorites: &FavoritesStore,
    dry_run: bool,
) -> Result<()> {
    let query = build_query(&params, page);

    if dry_run {
        println!("Would search the catalog with: {query}");
        return Ok(());
    }

    info!("🔍 Searching catalog: {query}");

    let mut state = SearchState::new();
    let ticket = client.dispatch(&mut state);
    let outcome = client.fetch(&query).await;
    state.settle(client, ticket, outcome);

    println!("{}", render_results(&state, favorites, page));

    if state.results.docs.is_empty() && state.error.is_none() {
        println!("\n💡 No results. Try different search terms or fewer filters.");
    }

    Ok(())
}
