use std::path::Path;

use decen_fs::{AtomicWriteOptions, atomic_write};
use decen_verify::Digest;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which server a cached document was fetched from.
///
/// Stored next to the cached page so that a later cache-hit replay can
/// resolve the page's relative references against the right origin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginRecord {
    pub digest: Digest,
    pub server: String,
}

impl OriginRecord {
    pub fn new(digest: Digest, server: impl Into<String>) -> Self {
        Self {
            digest,
            server: server.into(),
        }
    }

    /// `Ok(None)` when no record has been written for this document.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if decen_fs::file_size(path)?.is_none() {
            return Ok(None);
        }
        let bytes = decen_fs::atomic_read(path)?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| Error::Origin {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec_pretty(self).map_err(|source| Error::Origin {
            path: path.to_path_buf(),
            source,
        })?;
        atomic_write(path, &json, AtomicWriteOptions::new())?;
        Ok(())
    }
}
