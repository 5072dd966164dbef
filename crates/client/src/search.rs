//! The search client and its observable request state.
//!
//! One request is in flight per distinct query value. Dispatching a new
//! query bumps a generation counter and captures a ticket; a settlement
//! whose ticket no longer matches the latest generation is discarded
//! wholesale, so a slow response for a superseded query can never
//! overwrite newer state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bookfinder_types::SearchResults;
use tracing::debug;

use crate::error::Result;
use crate::executor::SearchExecutor;
use crate::query::PAGE_SIZE;

/// Catalog search endpoint the canonical query string is appended to.
pub const SEARCH_ENDPOINT: &str = "https://openlibrary.org/search.json";

/// Generation captured when a request was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Number of pages the pagination controls should offer.
///
/// Never zero, so the controls stay well-defined with no results.
pub fn total_pages(num_found: u64) -> u64 {
    num_found.div_ceil(PAGE_SIZE as u64).max(1)
}

/// Issues catalog requests and decides which settlements still count.
pub struct SearchClient {
    executor: Arc<dyn SearchExecutor>,
    latest: AtomicU64,
}

impl SearchClient {
    pub fn new(executor: Arc<dyn SearchExecutor>) -> Self {
        Self {
            executor,
            latest: AtomicU64::new(0),
        }
    }

    /// Begin a new request generation, superseding any prior one.
    ///
    /// Marks the state as loading and clears the previous error, exactly
    /// the prologue every query change performs.
    pub fn dispatch(&self, state: &mut SearchState) -> RequestTicket {
        state.loading = true;
        state.error = None;
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a ticket still belongs to the latest dispatched request.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Execute one search request for an already-canonical query string.
    pub async fn fetch(&self, query: &str) -> Result<SearchResults> {
        let url = format!("{SEARCH_ENDPOINT}?{query}");
        debug!("executing search request: {url}");

        let response = self.executor.execute(&url).await?;
        if !response.is_success() {
            return Err(crate::SearchError::Status {
                status: response.status,
            });
        }

        let results: SearchResults = serde_json::from_slice(&response.body)?;
        debug!(
            "search settled: {} docs, {} found",
            results.docs.len(),
            results.num_found
        );
        Ok(results)
    }
}

/// Loading/error/result state of the current search, as the view
/// observes it.
#[derive(Debug, Default)]
pub struct SearchState {
    pub loading: bool,
    pub error: Option<String>,
    pub results: SearchResults,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a settled request outcome, unless it has been superseded.
    ///
    /// A stale settlement mutates nothing: not the results, not the
    /// error, not the loading flag, which the newer dispatch owns.
    /// Success replaces the result set wholesale and clears any prior
    /// error; failure records a message and leaves stale results
    /// visible. Returns whether the settlement was applied.
    pub fn settle(
        &mut self,
        client: &SearchClient,
        ticket: RequestTicket,
        outcome: Result<SearchResults>,
    ) -> bool {
        if !client.is_current(ticket) {
            debug!("discarding settlement for superseded request");
            return false;
        }

        match outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn total_pages(&self) -> u64 {
        total_pages(self.results.num_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::executor::HttpResponse;
    use async_trait::async_trait;

    struct FixedExecutor {
        status: u16,
        body: &'static str,
    }

    #[async_trait]
    impl SearchExecutor for FixedExecutor {
        async fn execute(&self, _url: &str) -> Result<HttpResponse> {
            Ok(HttpResponse {
                status: self.status,
                body: self.body.as_bytes().to_vec(),
            })
        }
    }

    struct FailingExecutor;

    #[async_trait]
    impl SearchExecutor for FailingExecutor {
        async fn execute(&self, _url: &str) -> Result<HttpResponse> {
            Err(SearchError::Transport {
                message: "connection refused".to_string(),
            })
        }
    }

    fn client_with(executor: impl SearchExecutor + 'static) -> SearchClient {
        SearchClient::new(Arc::new(executor))
    }

    const ONE_DOC: &str = r#"{"docs":[{"key":"/works/OL1W","title":"Dune"}],"numFound":1}"#;

    #[test]
    fn total_pages_is_never_zero() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(20), 1);
        assert_eq!(total_pages(21), 2);
        assert_eq!(total_pages(100), 5);
    }

    #[tokio::test]
    async fn successful_fetch_replaces_results_and_clears_error() {
        let client = client_with(FixedExecutor {
            status: 200,
            body: ONE_DOC,
        });
        let mut state = SearchState::new();
        state.error = Some("previous failure".to_string());

        let ticket = client.dispatch(&mut state);
        assert!(state.loading);
        assert!(state.error.is_none());

        let outcome = client.fetch("title=dune").await;
        assert!(state.settle(&client, ticket, outcome));

        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.results.num_found, 1);
        assert_eq!(state.results.docs[0].title, "Dune");
    }

    #[tokio::test]
    async fn non_success_status_sets_error_and_keeps_results() {
        let client = client_with(FixedExecutor {
            status: 200,
            body: ONE_DOC,
        });
        let mut state = SearchState::new();

        let ticket = client.dispatch(&mut state);
        let outcome = client.fetch("title=dune").await;
        state.settle(&client, ticket, outcome);

        let failing = client_with(FixedExecutor {
            status: 503,
            body: "unavailable",
        });
        let ticket = failing.dispatch(&mut state);
        let outcome = failing.fetch("title=dune").await;
        assert!(state.settle(&failing, ticket, outcome));

        assert!(!state.loading);
        assert!(state.error.as_deref().unwrap().contains("503"));
        // Stale results stay visible behind the error line.
        assert_eq!(state.results.num_found, 1);
    }

    #[tokio::test]
    async fn transport_and_parse_failures_surface_as_messages() {
        let client = client_with(FailingExecutor);
        let mut state = SearchState::new();
        let ticket = client.dispatch(&mut state);
        let outcome = client.fetch("title=dune").await;
        state.settle(&client, ticket, outcome);
        assert!(state.error.as_deref().unwrap().contains("connection refused"));

        let client = client_with(FixedExecutor {
            status: 200,
            body: "not json",
        });
        let ticket = client.dispatch(&mut state);
        let outcome = client.fetch("title=dune").await;
        state.settle(&client, ticket, outcome);
        assert!(state.error.as_deref().unwrap().contains("malformed response"));
    }

    #[tokio::test]
    async fn superseded_settlement_is_discarded() {
        let client = client_with(FixedExecutor {
            status: 200,
            body: ONE_DOC,
        });
        let mut state = SearchState::new();

        let stale_ticket = client.dispatch(&mut state);
        let stale_outcome = client.fetch("title=old").await;

        // A newer query is issued before the first one settles.
        let fresh_ticket = client.dispatch(&mut state);
        assert!(!client.is_current(stale_ticket));
        assert!(client.is_current(fresh_ticket));

        assert!(!state.settle(&client, stale_ticket, stale_outcome));
        // The stale settlement touched nothing the fresh request owns.
        assert!(state.loading);
        assert_eq!(state.results.num_found, 0);

        let fresh_outcome = client.fetch("title=dune").await;
        assert!(state.settle(&client, fresh_ticket, fresh_outcome));
        assert!(!state.loading);
        assert_eq!(state.results.num_found, 1);
    }

    #[tokio::test]
    async fn stale_error_cannot_clear_newer_loading_state() {
        let failing = client_with(FailingExecutor);
        let mut state = SearchState::new();

        let stale_ticket = failing.dispatch(&mut state);
        let stale_outcome = failing.fetch("title=old").await;
        let _fresh_ticket = failing.dispatch(&mut state);

        assert!(!state.settle(&failing, stale_ticket, stale_outcome));
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn docs_and_num_found_default_when_absent() {
        let client = client_with(FixedExecutor {
            status: 200,
            body: "{}",
        });
        let results = client.fetch("").await.unwrap();
        assert!(results.docs.is_empty());
        assert_eq!(results.num_found, 0);
    }
}
