use bytes::Bytes;
use serde::Serialize;

use super::server::CandidateServer;
use crate::error::FetchFailure;

/// Result of one retrieval attempt. Failures never carry a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Bytes),
    TransportError(String),
    StatusError(u16),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool { matches!(self, Self::Success(_)) }

    pub fn into_result(self) -> Result<Bytes, FetchFailure> {
        match self {
            Self::Success(body) => Ok(body),
            Self::TransportError(reason) => Err(FetchFailure::Transport(reason)),
            Self::StatusError(code) => Err(FetchFailure::Status(code)),
        }
    }

    /// Body-free summary suitable for reports.
    pub fn status(&self) -> AttemptStatus {
        match self {
            Self::Success(body) => AttemptStatus::Found { bytes: body.len() as u64 },
            Self::TransportError(reason) => AttemptStatus::Transport {
                reason: reason.clone(),
            },
            Self::StatusError(code) => AttemptStatus::Status { code: *code },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptStatus {
    Found { bytes: u64 },
    Transport { reason: String },
    Status { code: u16 },
}

/// One candidate visited by the failover probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbeAttempt {
    pub server: CandidateServer,
    pub url: String,
    pub status: AttemptStatus,
}

/// The server chosen to supply the document, with what it served.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub server: CandidateServer,
    pub body: Bytes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProbeReport {
    /// Servers that served the document, in probe order.
    pub found_on: Vec<CandidateServer>,
    /// First server that served the document.
    pub selected: Option<Selection>,
    /// Every candidate actually contacted, in order.
    pub attempts: Vec<ProbeAttempt>,
}

impl ProbeReport {
    pub fn is_found(&self) -> bool { !self.found_on.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_result_maps_failures() {
        assert_eq!(
            FetchOutcome::Success(Bytes::from_static(b"x")).into_result(),
            Ok(Bytes::from_static(b"x"))
        );
        assert_eq!(
            FetchOutcome::StatusError(503).into_result(),
            Err(FetchFailure::Status(503))
        );
        assert_eq!(
            FetchOutcome::TransportError("reset".into()).into_result(),
            Err(FetchFailure::Transport("reset".into()))
        );
    }

    #[test]
    fn attempt_status_serializes_tagged() {
        let json = serde_json::to_string(&FetchOutcome::StatusError(404).status()).unwrap();
        assert_eq!(json, r#"{"kind":"status","code":404}"#);
        let json = serde_json::to_string(&FetchOutcome::Success(Bytes::from_static(b"abc")).status())
            .unwrap();
        assert_eq!(json, r#"{"kind":"found","bytes":3}"#);
    }
}
