use async_trait::async_trait;

use crate::error::Result;

/// A response delivered by an executor: the transport succeeded, the
/// status may still be anything.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam for the search client.
///
/// Production code injects [`crate::ReqwestExecutor`]; tests inject
/// fakes that settle in any order without touching the network.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn execute(&self, url: &str) -> Result<HttpResponse>;
}
