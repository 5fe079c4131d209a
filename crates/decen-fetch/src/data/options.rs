use std::sync::Arc;
use std::time::Duration;

/// Overall limit for one request, connection through last body byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like identification; some hosts refuse obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

/// Configuration for single-shot retrieval.
///
/// # Examples
///
/// ```
/// use decen_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .timeout(Duration::from_secs(5))
///     .header("Accept", "text/html");
/// assert_eq!(options.request_headers().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct FetchOptions {
    /// Upper bound on a whole request. Default: 30s.
    pub timeout: Duration,

    /// Sent as `User-Agent` on every request.
    pub user_agent: String,

    /// Extra headers sent on every request. Default: empty.
    pub headers: Arc<[(String, String)]>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Arc::from([]),
        }
    }
}

impl FetchOptions {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.to_vec();
        headers.push((key.into(), value.into()));
        self.headers = headers.into();
        self
    }

    /// All headers for one request, identification first.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        std::iter::once(("User-Agent".to_string(), self.user_agent.clone()))
            .chain(self.headers.iter().cloned())
            .collect()
    }
}
