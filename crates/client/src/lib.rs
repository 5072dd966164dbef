//! Search client for the Open Library catalog.
//!
//! This crate turns a [`bookfinder_types::SearchParams`] record into a
//! canonical query string, executes it against the catalog's search
//! endpoint, and tracks the loading/error/result state of the single
//! in-flight request. Responses for superseded queries are discarded
//! via a generation counter, never applied to shared state.

pub mod error;
pub mod executor;
pub mod query;
pub mod reqwest;
pub mod search;

pub use error::{Result, SearchError};
pub use executor::{HttpResponse, SearchExecutor};
pub use query::{CoverSize, PAGE_SIZE, SEARCH_FIELDS, build_query, cover_url};
pub use self::reqwest::ReqwestExecutor;
pub use search::{RequestTicket, SEARCH_ENDPOINT, SearchClient, SearchState, total_pages};
