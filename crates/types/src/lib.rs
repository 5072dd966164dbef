//! Shared data model for the bookfinder project.
//!
//! These are the records exchanged between the search client, the
//! favorites storage, and the CLI: the filter parameters that drive a
//! catalog query, the wire records a search returns, and the compact
//! projection we persist for favorited books.

use serde::{Deserialize, Serialize};

/// Result ordering requested from the catalog.
///
/// `Relevance` is the server default and emits no `sort` parameter at
/// all; the other variants map to the catalog's sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Newest,
    Oldest,
    Editions,
}

impl SortOrder {
    /// The catalog-side value for the `sort` query parameter, or `None`
    /// when the server default ordering applies.
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            SortOrder::Relevance => None,
            SortOrder::Newest => Some("first_publish_year desc"),
            SortOrder::Oldest => Some("first_publish_year asc"),
            SortOrder::Editions => Some("edition_count desc"),
        }
    }

    /// Parse a user-facing name ("relevance", "newest", ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "relevance" => Some(SortOrder::Relevance),
            "newest" => Some(SortOrder::Newest),
            "oldest" => Some(SortOrder::Oldest),
            "editions" => Some(SortOrder::Editions),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Editions => "editions",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentinel language value meaning "no language filter".
pub const ANY_LANGUAGE: &str = "any";

/// The full set of filter parameters for a catalog search.
///
/// Every field is always present: text filters default to the empty
/// string, `language` to the [`ANY_LANGUAGE`] sentinel, and `sort` to
/// [`SortOrder::Relevance`]. The year bounds are kept as entered, with
/// no numeric or ordering validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub isbn: String,
    pub language: String,
    pub year_from: String,
    pub year_to: String,
    pub sort: SortOrder,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            subject: String::new(),
            isbn: String::new(),
            language: ANY_LANGUAGE.to_string(),
            year_from: String::new(),
            year_to: String::new(),
            sort: SortOrder::Relevance,
        }
    }
}

impl SearchParams {
    /// True when no language filter should be emitted.
    pub fn language_is_any(&self) -> bool {
        self.language == ANY_LANGUAGE
    }
}

/// An editable parameter field, as addressed by the interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    Title,
    Author,
    Subject,
    Isbn,
    Language,
    YearFrom,
    YearTo,
    Sort,
}

impl ParamField {
    /// Whether editing this field invalidates the pagination position.
    ///
    /// Only the text filters reset the page; language, year bounds and
    /// sort leave it alone.
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            ParamField::Title | ParamField::Author | ParamField::Subject | ParamField::Isbn
        )
    }
}

/// One book record as returned by the catalog search endpoint.
///
/// Every field tolerates absence in the wire JSON; a record is never
/// persisted beyond the result set it arrived in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub edition_count: u32,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub isbn: Vec<String>,
}

/// The compact projection of a [`BookSummary`] kept in the favorites
/// list. Exactly these five fields are persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
}

impl From<&BookSummary> for FavoriteRecord {
    fn from(book: &BookSummary) -> Self {
        Self {
            key: book.key.clone(),
            title: book.title.clone(),
            author_name: book.author_name.clone(),
            cover_i: book.cover_i,
            first_publish_year: book.first_publish_year,
        }
    }
}

impl From<&FavoriteRecord> for BookSummary {
    /// Rehydrate a summary from a stored favorite. Fields the projection
    /// dropped come back at their wire defaults.
    fn from(record: &FavoriteRecord) -> Self {
        Self {
            key: record.key.clone(),
            title: record.title.clone(),
            author_name: record.author_name.clone(),
            first_publish_year: record.first_publish_year,
            edition_count: 0,
            cover_i: record.cover_i,
            language: Vec::new(),
            isbn: Vec::new(),
        }
    }
}

/// A whole search response: the visible page of records plus the total
/// match count. Replaced wholesale on every successful response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub docs: Vec<BookSummary>,
    #[serde(rename = "numFound", default)]
    pub num_found: u64,
}
