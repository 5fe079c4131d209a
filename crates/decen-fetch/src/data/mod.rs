//! Immutable data types for fetching and probing.

pub mod options;
pub mod outcome;
pub mod server;

pub use options::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, FetchOptions};
pub use outcome::{AttemptStatus, FetchOutcome, ProbeAttempt, ProbeReport, Selection};
pub use server::{CandidateServer, parse_server_list};
