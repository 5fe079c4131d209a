use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] decen_fs::Error),

    #[error("'{path}' is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },

    #[error("malformed origin record '{path}': {source}")]
    Origin {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
