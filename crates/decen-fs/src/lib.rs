//! Filesystem primitives for the local mirror store.
//!
//! - `primitives` - atomic writes and directory helpers
//! - `sanitize` - turning remote path segments into safe local names

mod error;
mod primitives;
mod sanitize;

pub use error::{Error, Result};
pub use primitives::{AtomicWriteOptions, atomic_read, atomic_write, ensure_dir, file_size};
pub use sanitize::{DEFAULT_GROUP, group_name, sanitize_filename};
