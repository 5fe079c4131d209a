//! Bounded-time HTTP retrieval and ordered server failover.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and result types
//! - [`core`] - Pure transformations (URL conventions, status classes)
//! - `effects` - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Classified outcomes**: every fetch ends as success, transport error,
//!   or status error; no error body is ever returned as content
//! - **Bounded**: each request is capped by a fixed overall timeout
//! - **Sequential failover**: candidates are probed strictly in order and
//!   the first one serving the document wins

pub mod core;
pub mod data;
mod effects;
mod error;

pub use data::{
    AttemptStatus, CandidateServer, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, FetchOptions,
    FetchOutcome, ProbeAttempt, ProbeReport, Selection, parse_server_list,
};
pub use effects::{ContentFetcher, FailoverProbe, HttpClient, HttpResponse, MockClient, MockError};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, FetchFailure, Result, error_chain};
