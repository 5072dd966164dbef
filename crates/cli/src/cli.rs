use std::path::PathBuf;

use bookfinder_types::{ANY_LANGUAGE, SearchParams, SortOrder};

#[derive(clap::Parser, Debug)]
#[clap(name = "bookfinder", about = "Find books fast with Open Library", version)]
pub struct Cli {
    /// Enable verbose logging
    #[clap(long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[clap(long, global = true)]
    pub quiet: bool,

    /// Override the favorites storage directory
    #[clap(long, global = true)]
    pub storage_path: Option<PathBuf>,

    /// Show what would happen without doing it
    #[clap(long, global = true)]
    pub dry_run: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run a one-shot catalog search
    Search {
        #[clap(flatten)]
        filters: FilterArgs,

        /// Result page to fetch
        #[clap(long, default_value_t = 1)]
        page: u32,
    },
    /// Browse the catalog interactively
    Browse {
        #[clap(flatten)]
        filters: FilterArgs,
    },
    /// Manage the persisted favorites list
    Favorites {
        #[clap(subcommand)]
        command: FavoritesCommands,
    },
    /// Manage configuration
    Config {
        #[clap(subcommand)]
        command: ConfigCommands,
    },
}

/// Filter flags shared by `search` and `browse`.
#[derive(clap::Args, Debug, Default)]
pub struct FilterArgs {
    /// Filter by title
    #[clap(long)]
    pub title: Option<String>,

    /// Filter by author
    #[clap(long)]
    pub author: Option<String>,

    /// Filter by subject
    #[clap(long)]
    pub subject: Option<String>,

    /// Filter by ISBN
    #[clap(long)]
    pub isbn: Option<String>,

    /// Filter by language code (e.g. "eng"), or "any"
    #[clap(long)]
    pub language: Option<String>,

    /// Lower bound on first publish year
    #[clap(long)]
    pub year_from: Option<String>,

    /// Upper bound on first publish year
    #[clap(long)]
    pub year_to: Option<String>,

    /// Result ordering
    #[clap(long, value_enum, default_value_t = SortOrder::Relevance)]
    pub sort: SortOrder,
}

impl FilterArgs {
    pub fn into_params(self) -> SearchParams {
        SearchParams {
            title: self.title.unwrap_or_default(),
            author: self.author.unwrap_or_default(),
            subject: self.subject.unwrap_or_default(),
            isbn: self.isbn.unwrap_or_default(),
            language: self.language.unwrap_or_else(|| ANY_LANGUAGE.to_string()),
            year_from: self.year_from.unwrap_or_default(),
            year_to: self.year_to.unwrap_or_default(),
            sort: self.sort,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum FavoritesCommands {
    /// List all persisted favorites
    List,
    /// Remove a favorite by its record key
    Remove {
        /// Record key, e.g. "/works/OL27448W"
        key: String,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
    /// Show the whole configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[clap(long)]
        force: bool,
    },
}
