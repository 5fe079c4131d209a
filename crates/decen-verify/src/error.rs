#[derive(Debug, thiserror::Error)]
pub enum ParseDigestError {
    #[error("digest must be 64 hex characters, got {0} characters")]
    Length(usize),

    #[error("digest contains non-hex character {0:?}")]
    NonHex(char),
}

pub type Result<T> = std::result::Result<T, ParseDigestError>;
