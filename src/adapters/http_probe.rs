//! Reachability probe backed by an HTTP request.

use async_trait::async_trait;

use crate::traits::{Headers, HttpClient, HttpError, ReachabilityProbe};

/// Treats the deck service as reachable when a GET to `url` produces any
/// HTTP response at all, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpReachabilityProbe<C: HttpClient> {
    http: C,
    url: String,
}

impl<C: HttpClient> HttpReachabilityProbe<C> {
    pub fn new(http: C, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<C: HttpClient> ReachabilityProbe for HttpReachabilityProbe<C> {
    async fn is_reachable(&self) -> bool {
        match self.http.get(&self.url, &Headers::new()).await {
            Ok(_) => true,
            // A status error still means something answered.
            Err(HttpError::ServerError { .. }) => true,
            Err(e) => {
                tracing::trace!("Reachability probe to {} failed: {}", self.url, e);
                false
            }
        }
    }
}
