use std::path::PathBuf;

use decen_fetch::FetchFailure;
use thiserror::Error;

/// Fatal errors: the cache could not be prepared or read.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] decen_fs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),

    #[error("no server list at '{path}': {source}")]
    MissingServerList {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self { Self::Figment(Box::new(value)) }
}

/// Why one asset was not mirrored. Its `Display` is the record's detail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status code {0}")]
    Status(u16),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("cannot parse '{url}': {reason}")]
    Parse { url: String, reason: String },
}

impl From<FetchFailure> for AssetError {
    fn from(value: FetchFailure) -> Self {
        match value {
            FetchFailure::Transport(reason) => Self::Transport(reason),
            FetchFailure::Status(code) => Self::Status(code),
        }
    }
}

impl From<decen_fs::Error> for AssetError {
    fn from(value: decen_fs::Error) -> Self {
        Self::Filesystem(value.to_string())
    }
}
