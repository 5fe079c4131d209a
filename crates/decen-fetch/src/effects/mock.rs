use std::collections::HashMap;
use std::sync::Mutex;

use bytes::Bytes;

use super::http::{HttpClient, HttpResponse};

#[derive(Clone, Debug)]
enum Route {
    Respond(HttpResponse),
    Fail(String),
    Hang,
}

/// Transport failure produced by [`MockClient`].
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

/// Mock HTTP client for testing.
///
/// URLs without a configured route answer `404`. Every request is logged so
/// tests can assert which servers were (not) contacted.
#[derive(Debug, Default)]
pub struct MockClient {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    /// Answer `url` with `200` and `body`.
    pub fn with_body(self, url: impl Into<String>, body: impl Into<Bytes>) -> Self {
        self.with_response(url, 200, body)
    }

    pub fn with_response(
        mut self,
        url: impl Into<String>,
        status: u16,
        body: impl Into<Bytes>,
    ) -> Self {
        self.routes
            .insert(url.into(), Route::Respond(HttpResponse::new(status, body)));
        self
    }

    /// Fail `url` at the transport level.
    pub fn with_failure(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Fail(reason.into()));
        self
    }

    /// Never answer `url`.
    pub fn with_hang(mut self, url: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Route::Hang);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.log().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.log().iter().filter(|(seen, _)| seen == url).count()
    }

    pub fn last_headers(&self) -> Option<Vec<(String, String)>> {
        self.log().last().map(|(_, headers)| headers.clone())
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<(String, Vec<(String, String)>)>> {
        self.requests.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> std::result::Result<HttpResponse, Self::Error> {
        self.log().push((url.to_string(), headers.to_vec()));
        let route = self.routes.get(url).cloned();

        match route {
            Some(Route::Respond(response)) => Ok(response),
            Some(Route::Fail(reason)) => Err(MockError(reason)),
            Some(Route::Hang) => std::future::pending().await,
            None => Ok(HttpResponse::new(404, Bytes::new())),
        }
    }
}
