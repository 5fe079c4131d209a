//! Mirror synchronization engine.
//!
//! Given a [`Digest`](decen_verify::Digest), [`MirrorOrchestrator`] either
//! replays a cached document or probes candidate servers for it, caches a
//! copy whose relative links point back at the serving origin, and then
//! pulls every referenced asset into a local store.
//!
//! - [`link`] - reference extraction, classification and rewriting
//! - [`asset`] - idempotent per-asset download into `<store>/<group>/<file>`
//! - [`config`] - layered configuration and the server list

pub mod asset;
pub mod config;
pub mod link;

mod error;
mod orchestrator;

pub use asset::{AssetRecord, AssetStatus, AssetSynchronizer, MirrorSummary, SyncReport};
pub use config::{MirrorConfig, load_servers};
pub use error::{AssetError, ConfigError, Error, Result};
pub use link::{LinkClass, LinkKind, LinkReference, LinkResolver, extract, rewrite};
pub use orchestrator::{MirrorOrchestrator, MirrorReport, RunOutcome};
