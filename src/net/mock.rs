use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::data::HttpResponse;
use crate::ArcStr;

/// Mock implementation of the Net actor for testing purposes.
///
/// Responses are canned per URL and every requested URL is recorded, so tests
/// can check both what was returned and what was asked for.
#[derive(Debug, Clone, Default)]
pub struct Mock {
    responses: Arc<Mutex<HashMap<ArcStr, HttpResponse>>>,
    requests: Arc<Mutex<Vec<ArcStr>>>,
}

impl Mock {
    pub fn new(responses: HashMap<ArcStr, HttpResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Default::default(),
        }
    }

    /// Serves the canned response for `url`. A URL with no canned response
    /// behaves like an unreachable host.
    pub async fn get(&self, url: ArcStr) -> anyhow::Result<HttpResponse> {
        self.requests.lock().await.push(url.clone());
        let responses = self.responses.lock().await;
        responses
            .get(&url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("GET request not found in mock responses: {url}"))
    }

    pub async fn requests(&self) -> Vec<ArcStr> {
        self.requests.lock().await.clone()
    }
}
