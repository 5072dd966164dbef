use async_trait::async_trait;

use crate::error::Result;
use crate::executor::{HttpResponse, SearchExecutor};

/// Production executor backed by a shared [`reqwest::Client`].
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SearchExecutor for ReqwestExecutor {
    async fn execute(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}
