//! State machine behind the interactive browse session.
//!
//! The session holds the filter parameters, the current page, the
//! search state and the favorites list. Every intent funnels through
//! [`App::handle`]; after any parameter or page change the canonical
//! query is recomputed and a new request is dispatched only when the
//! string actually changed, superseding whatever was in flight.

use bookfinder_client::{SearchClient, SearchState, build_query};
use bookfinder_storage::FavoritesStore;
use bookfinder_types::{ANY_LANGUAGE, ParamField, SearchParams, SortOrder};
use tracing::warn;

use crate::render;

/// One user action inside the browse session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Edit(ParamField, String),
    NextPage,
    PrevPage,
    GotoPage(u32),
    ToggleFavorite(usize),
    ShowBook(usize),
    ListFavorites,
    Help,
    Quit,
}

pub struct App {
    params: SearchParams,
    page: u32,
    client: SearchClient,
    state: SearchState,
    favorites: FavoritesStore,
    last_query: Option<String>,
}

impl App {
    pub fn new(params: SearchParams, client: SearchClient, favorites: FavoritesStore) -> Self {
        Self {
            params,
            page: 1,
            client,
            state: SearchState::new(),
            favorites,
            last_query: None,
        }
    }

    /// Issue the initial query for the session's starting parameters.
    pub async fn start(&mut self) {
        self.refresh().await;
    }

    /// Parse one input line into an intent.
    pub fn parse_intent(line: &str) -> Result<Intent, String> {
        let trimmed = line.trim();
        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };
        let edit = |field: ParamField| Ok(Intent::Edit(field, rest.to_string()));

        match command {
            "" | "help" | "?" => Ok(Intent::Help),
            "quit" | "exit" | "q" => Ok(Intent::Quit),
            "title" => edit(ParamField::Title),
            "author" => edit(ParamField::Author),
            "subject" => edit(ParamField::Subject),
            "isbn" => edit(ParamField::Isbn),
            "language" | "lang" => edit(ParamField::Language),
            "year-from" | "from" => edit(ParamField::YearFrom),
            "year-to" | "to" => edit(ParamField::YearTo),
            "sort" => edit(ParamField::Sort),
            "next" | "n" => Ok(Intent::NextPage),
            "prev" | "p" => Ok(Intent::PrevPage),
            "page" => rest
                .parse()
                .map(Intent::GotoPage)
                .map_err(|_| format!("Not a page number: '{rest}'")),
            "fav" | "f" => rest
                .parse()
                .map(Intent::ToggleFavorite)
                .map_err(|_| format!("Not a result number: '{rest}'")),
            "show" => rest
                .parse()
                .map(Intent::ShowBook)
                .map_err(|_| format!("Not a result number: '{rest}'")),
            "favs" | "favorites" => Ok(Intent::ListFavorites),
            _ => Err(format!(
                "Unknown command: '{command}' (type 'help' for commands)"
            )),
        }
    }

    /// Apply one intent, returning an optional notice for the user.
    pub async fn handle(&mut self, intent: Intent) -> Option<String> {
        match intent {
            Intent::Edit(field, value) => {
                if let Err(notice) = self.apply_edit(field, value) {
                    return Some(notice);
                }
                self.refresh().await;
                None
            }
            Intent::NextPage => {
                let total = self.clamped_total();
                self.page = (self.page + 1).min(total);
                self.refresh().await;
                None
            }
            Intent::PrevPage => {
                self.page = self.page.saturating_sub(1).max(1);
                self.refresh().await;
                None
            }
            Intent::GotoPage(requested) => {
                self.page = requested.clamp(1, self.clamped_total());
                self.refresh().await;
                None
            }
            Intent::ToggleFavorite(position) => self.toggle_favorite(position).await,
            Intent::ShowBook(position) => Some(self.book_details(position)),
            Intent::ListFavorites => Some(self.list_favorites()),
            // Help and Quit are handled by the session loop.
            Intent::Help | Intent::Quit => None,
        }
    }

    /// Render the whole view: filter summary plus the result panel.
    pub fn render(&self) -> String {
        format!(
            "📚 bookfinder · {}\n{}",
            self.filters_line(),
            render::render_results(&self.state, &self.favorites, self.page)
        )
    }

    fn apply_edit(&mut self, field: ParamField, value: String) -> Result<(), String> {
        let changed = match field {
            ParamField::Title => assign(&mut self.params.title, value),
            ParamField::Author => assign(&mut self.params.author, value),
            ParamField::Subject => assign(&mut self.params.subject, value),
            ParamField::Isbn => assign(&mut self.params.isbn, value),
            ParamField::Language => {
                let value = if value.is_empty() {
                    ANY_LANGUAGE.to_string()
                } else {
                    value
                };
                assign(&mut self.params.language, value)
            }
            ParamField::YearFrom => assign(&mut self.params.year_from, value),
            ParamField::YearTo => assign(&mut self.params.year_to, value),
            ParamField::Sort => {
                let sort = SortOrder::parse(&value).ok_or_else(|| {
                    format!("Unknown sort order: '{value}' (relevance, newest, oldest, editions)")
                })?;
                let changed = self.params.sort != sort;
                self.params.sort = sort;
                changed
            }
        };

        // A changed text filter invalidates the pagination position;
        // language, year bounds and sort keep it.
        if changed && field.resets_page() {
            self.page = 1;
        }
        Ok(())
    }

    /// Recompute the canonical query; dispatch only when it changed.
    async fn refresh(&mut self) {
        let query = build_query(&self.params, self.page);
        if self.last_query.as_deref() == Some(query.as_str()) {
            return;
        }
        self.last_query = Some(query.clone());

        let ticket = self.client.dispatch(&mut self.state);
        let outcome = self.client.fetch(&query).await;
        self.state.settle(&self.client, ticket, outcome);
    }

    async fn toggle_favorite(&mut self, position: usize) -> Option<String> {
        let book = position
            .checked_sub(1)
            .and_then(|index| self.state.results.docs.get(index))
            .cloned();

        match book {
            Some(book) => match self.favorites.toggle(&book).await {
                Ok(true) => Some(format!("★ Added to favorites: {}", book.title)),
                Ok(false) => Some(format!("☆ Removed from favorites: {}", book.title)),
                Err(err) => {
                    warn!("failed to persist favorites: {err}");
                    Some(format!("⚠ Could not save favorites: {err}"))
                }
            },
            None => Some(format!("No result #{position} on this page")),
        }
    }

    fn book_details(&self, position: usize) -> String {
        let book = position
            .checked_sub(1)
            .and_then(|index| self.state.results.docs.get(index));

        match book {
            Some(book) => {
                let mut out = render::book_entry(position, book, self.favorites.contains(&book.key));
                if !book.language.is_empty() {
                    out.push_str(&format!("     languages: {}\n", book.language.join(", ")));
                }
                if !book.isbn.is_empty() {
                    out.push_str(&format!("     isbn: {}\n", book.isbn.join(", ")));
                }
                out.push_str(&format!("     key: {}\n", book.key));
                out
            }
            None => format!("No result #{position} on this page"),
        }
    }

    fn list_favorites(&self) -> String {
        if self.favorites.is_empty() {
            return "No favorites yet. Toggle one with: fav <n>".to_string();
        }

        let mut out = format!("Favorites ({}):\n", self.favorites.len());
        for (index, record) in self.favorites.entries().iter().enumerate() {
            out.push_str(&render::favorite_entry(index + 1, record));
        }
        out
    }

    fn filters_line(&self) -> String {
        let mut parts = Vec::new();
        for (name, value) in [
            ("title", &self.params.title),
            ("author", &self.params.author),
            ("subject", &self.params.subject),
            ("isbn", &self.params.isbn),
            ("year-from", &self.params.year_from),
            ("year-to", &self.params.year_to),
        ] {
            if !value.is_empty() {
                parts.push(format!("{name}=\"{value}\""));
            }
        }
        if !self.params.language_is_any() {
            parts.push(format!("language={}", self.params.language));
        }
        if self.params.sort != SortOrder::Relevance {
            parts.push(format!("sort={}", self.params.sort.as_str()));
        }

        if parts.is_empty() {
            "no filters".to_string()
        } else {
            parts.join(" · ")
        }
    }

    fn clamped_total(&self) -> u32 {
        self.state.total_pages().min(u32::MAX as u64) as u32
    }
}

fn assign(slot: &mut String, value: String) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

pub fn help_text() -> &'static str {
    "Commands:\n\
     \u{20}  title/author/subject/isbn <text>   set a text filter (empty clears)\n\
     \u{20}  language <code>                    filter by language (\"any\" clears)\n\
     \u{20}  year-from/year-to <year>           bound the first publish year\n\
     \u{20}  sort <order>                       relevance | newest | oldest | editions\n\
     \u{20}  next / prev / page <n>             paginate\n\
     \u{20}  fav <n>                            toggle favorite on the n-th result\n\
     \u{20}  show <n>                           details for the n-th result\n\
     \u{20}  favs                               list favorites\n\
     \u{20}  quit                               leave the session"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bookfinder_client::{HttpResponse, Result as ClientResult, SearchExecutor};
    use bookfinder_storage::MemoryStorage;

    struct RecordingExecutor {
        body: &'static str,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchExecutor for RecordingExecutor {
        async fn execute(&self, url: &str) -> ClientResult<HttpResponse> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: 200,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    const DUNE: &str = r#"{"docs":[{"key":"/works/OL1W","title":"Dune","author_name":["Frank Herbert"],"first_publish_year":1965,"edition_count":5,"cover_i":123}],"numFound":1}"#;
    const MANY: &str = r#"{"docs":[],"numFound":100}"#;

    async fn app_with(body: &'static str, params: SearchParams) -> (App, Arc<RecordingExecutor>) {
        let executor = Arc::new(RecordingExecutor {
            body,
            urls: Mutex::new(Vec::new()),
        });
        let client = SearchClient::new(executor.clone());
        let favorites = FavoritesStore::open(Arc::new(MemoryStorage::new())).await;
        (App::new(params, client, favorites), executor)
    }

    fn edit(field: ParamField, value: &str) -> Intent {
        Intent::Edit(field, value.to_string())
    }

    #[tokio::test]
    async fn dune_end_to_end() {
        let params = SearchParams {
            title: "dune".to_string(),
            ..SearchParams::default()
        };
        let (mut app, executor) = app_with(DUNE, params).await;
        app.start().await;

        let url = executor.urls.lock().unwrap()[0].clone();
        assert!(url.starts_with("https://openlibrary.org/search.json?title=dune&"));
        assert!(url.contains("limit=20&page=1"));

        let rendered = app.render();
        assert!(rendered.contains("1 results"));
        assert!(rendered.contains("Dune"));
        assert!(rendered.contains("Frank Herbert"));
        assert!(rendered.contains("1965 • 5 ed."));
        assert!(rendered.contains("(prev disabled, next disabled)"));
    }

    #[tokio::test]
    async fn text_filter_change_resets_page() {
        let (mut app, _) = app_with(MANY, SearchParams::default()).await;
        app.start().await;

        app.handle(Intent::GotoPage(3)).await;
        assert_eq!(app.page, 3);

        app.handle(edit(ParamField::Title, "dune")).await;
        assert_eq!(app.page, 1);

        app.handle(Intent::GotoPage(3)).await;
        app.handle(edit(ParamField::Author, "herbert")).await;
        assert_eq!(app.page, 1);
    }

    #[tokio::test]
    async fn non_text_filter_changes_preserve_page() {
        let (mut app, _) = app_with(MANY, SearchParams::default()).await;
        app.start().await;

        app.handle(Intent::GotoPage(3)).await;
        app.handle(edit(ParamField::Language, "eng")).await;
        assert_eq!(app.page, 3);

        app.handle(edit(ParamField::Sort, "newest")).await;
        assert_eq!(app.page, 3);

        app.handle(edit(ParamField::YearFrom, "1960")).await;
        app.handle(edit(ParamField::YearTo, "1990")).await;
        assert_eq!(app.page, 3);
    }

    #[tokio::test]
    async fn unchanged_filter_value_neither_resets_nor_refetches() {
        let params = SearchParams {
            title: "dune".to_string(),
            ..SearchParams::default()
        };
        let (mut app, executor) = app_with(MANY, params).await;
        app.start().await;
        app.handle(Intent::GotoPage(2)).await;
        let requests = executor.urls.lock().unwrap().len();

        app.handle(edit(ParamField::Title, "dune")).await;
        assert_eq!(app.page, 2);
        assert_eq!(executor.urls.lock().unwrap().len(), requests);
    }

    #[tokio::test]
    async fn pagination_is_clamped() {
        let (mut app, _) = app_with(MANY, SearchParams::default()).await;
        app.start().await;
        assert_eq!(app.state.total_pages(), 5);

        app.handle(Intent::PrevPage).await;
        assert_eq!(app.page, 1);

        for _ in 0..8 {
            app.handle(Intent::NextPage).await;
        }
        assert_eq!(app.page, 5);

        app.handle(Intent::GotoPage(99)).await;
        assert_eq!(app.page, 5);

        app.handle(Intent::GotoPage(0)).await;
        assert_eq!(app.page, 1);
    }

    #[tokio::test]
    async fn favorite_toggle_round_trip() {
        let params = SearchParams {
            title: "dune".to_string(),
            ..SearchParams::default()
        };
        let (mut app, _) = app_with(DUNE, params).await;
        app.start().await;

        let notice = app.handle(Intent::ToggleFavorite(1)).await.unwrap();
        assert!(notice.contains("Added"));
        assert!(app.favorites.contains("/works/OL1W"));
        assert!(app.render().contains("★ Dune"));

        let notice = app.handle(Intent::ToggleFavorite(1)).await.unwrap();
        assert!(notice.contains("Removed"));
        assert!(!app.favorites.contains("/works/OL1W"));

        let notice = app.handle(Intent::ToggleFavorite(7)).await.unwrap();
        assert!(notice.contains("No result #7"));
    }

    #[tokio::test]
    async fn sort_change_redispatches_with_sort_key() {
        let (mut app, executor) = app_with(MANY, SearchParams::default()).await;
        app.start().await;

        app.handle(edit(ParamField::Sort, "newest")).await;
        let url = executor.urls.lock().unwrap().last().unwrap().clone();
        assert!(url.contains("sort=first_publish_year+desc"));

        let notice = app.handle(edit(ParamField::Sort, "backwards")).await;
        assert!(notice.unwrap().contains("Unknown sort order"));
    }

    #[test]
    fn intent_parsing() {
        assert_eq!(
            App::parse_intent("title dune messiah"),
            Ok(Intent::Edit(ParamField::Title, "dune messiah".to_string()))
        );
        assert_eq!(
            App::parse_intent("title"),
            Ok(Intent::Edit(ParamField::Title, String::new()))
        );
        assert_eq!(App::parse_intent("next"), Ok(Intent::NextPage));
        assert_eq!(App::parse_intent("page 4"), Ok(Intent::GotoPage(4)));
        assert_eq!(App::parse_intent("fav 2"), Ok(Intent::ToggleFavorite(2)));
        assert_eq!(App::parse_intent("favs"), Ok(Intent::ListFavorites));
        assert_eq!(App::parse_intent("  quit "), Ok(Intent::Quit));
        assert_eq!(App::parse_intent(""), Ok(Intent::Help));
        assert!(App::parse_intent("page nope").is_err());
        assert!(App::parse_intent("frobnicate").is_err());
    }
}
