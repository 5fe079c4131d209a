//! Error types for decen-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "reqwest")]
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid server URL: {0:?}")]
    InvalidServer(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single retrieval produced no content.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status code {0}")]
    Status(u16),
}

/// Render an error with its whole `source()` chain, `outer: inner: root`.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !rendered.contains(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        source = inner.source();
    }
    rendered
}
