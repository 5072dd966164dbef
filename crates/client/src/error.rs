use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors produced while executing a catalog search.
///
/// Transport failures, non-success statuses and body parse failures all
/// collapse to a single user-visible message line in the view; results
/// from the previous successful query stay visible either way.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request never produced a usable response.
    #[error("network error: {message}")]
    Transport { message: String },

    /// The catalog answered with a non-success status code.
    #[error("network error: server returned status {status}")]
    Status { status: u16 },

    /// The response body was not the JSON we expect.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(value: reqwest::Error) -> Self {
        SearchError::Transport {
            message: value.to_string(),
        }
    }
}
