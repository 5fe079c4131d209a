use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base URL of an origin believed to host digest content.
///
/// Stored without surrounding whitespace and without trailing slashes, so
/// paths can be appended with a single `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateServer(String);

impl CandidateServer {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::InvalidServer(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CandidateServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for CandidateServer {
    fn as_ref(&self) -> &str { &self.0 }
}

/// Parse a ranked server list: one URL per line, order preserved.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_server_list(text: &str) -> Vec<CandidateServer> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| CandidateServer::parse(line).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace_and_trailing_slashes() {
        let server = CandidateServer::parse("  https://example.org//  ").unwrap();
        assert_eq!(server.as_str(), "https://example.org");
    }

    #[test]
    fn rejects_empty() {
        assert!(CandidateServer::parse("   ").is_err());
        assert!(CandidateServer::parse("/").is_err());
    }

    #[test]
    fn list_keeps_order_and_skips_noise() {
        let list = parse_server_list(
            "https://a.example/\r\n\n# backup mirrors\nhttp://b.example\n   \nhttps://c.example/x/\n",
        );
        let names: Vec<_> = list.iter().map(CandidateServer::as_str).collect();
        assert_eq!(names, ["https://a.example", "http://b.example", "https://c.example/x"]);
    }
}
