use std::future::Future;

use bytes::Bytes;

/// Status line and body of a completed GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface the mirror needs: one GET that
/// materializes the whole body. Implementations follow redirects themselves
/// and report transport problems (DNS, connect, body read) as `Err`. Status
/// codes are returned as data, never as errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - [`MockClient`](super::MockClient): canned responses for tests
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Perform a GET with the given headers.
    ///
    /// Implementations may skip reading the body of error responses
    /// (status >= 400); callers discard it anyway.
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> impl Future<Output = std::result::Result<HttpResponse, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::core::is_error_status;
    use crate::data::FetchOptions;
    use crate::error::{Error, Result};

    /// Production HTTP client implementation using reqwest.
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Build a client whose own timeout matches `options`.
        pub fn new(options: &FetchOptions) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(options.timeout)
                .build()
                .map_err(Error::ClientBuild)?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn get(
            &self,
            url: &str,
            headers: &[(String, String)],
        ) -> std::result::Result<HttpResponse, Self::Error> {
            let mut request = self.client.get(url);

            for (key, value) in headers {
                request = request.header(key, value);
            }

            let response = request.send().await?;
            let status = response.status().as_u16();
            if is_error_status(status) {
                return Ok(HttpResponse::new(status, Bytes::new()));
            }

            let body = response.bytes().await?;
            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
