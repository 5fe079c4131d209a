use crate::core::{is_error_status, is_redirect};
use crate::data::{FetchOptions, FetchOutcome};
use crate::effects::http::HttpClient;
use crate::error::error_chain;

/// Single bounded-time retrieval with failure classification.
///
/// Every call completes within [`FetchOptions::timeout`] regardless of the
/// client implementation. Transport failures and error statuses come back
/// as [`FetchOutcome`] variants; nothing here panics or returns `Err`.
pub struct ContentFetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> ContentFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        tracing::debug!(url, "fetching");
        let headers = self.options.request_headers();

        let response =
            match tokio::time::timeout(self.options.timeout, self.client.get(url, &headers)).await
            {
                Err(_) => {
                    let reason = format!("timed out after {:?}", self.options.timeout);
                    tracing::warn!(url, %reason, "fetch failed");
                    return FetchOutcome::TransportError(reason);
                }
                Ok(Err(e)) => {
                    let reason = error_chain(&e);
                    tracing::warn!(url, %reason, "fetch failed");
                    return FetchOutcome::TransportError(reason);
                }
                Ok(Ok(response)) => response,
            };

        if is_error_status(response.status) {
            tracing::warn!(url, status = response.status, "fetch rejected");
            return FetchOutcome::StatusError(response.status);
        }

        if is_redirect(response.status) {
            tracing::warn!(url, status = response.status, "redirect was not followed");
        }

        tracing::debug!(url, status = response.status, bytes = response.body.len(), "fetched");
        FetchOutcome::Success(response.body)
    }
}
