use crate::{Error, Result};
use std::io;
use std::path::Path;

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| Error::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Size of an existing file, `None` when nothing is at `path`.
pub fn file_size(path: impl AsRef<Path>) -> Result<Option<u64>> {
    let path = path.as_ref();
    match std::fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.len())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::Metadata {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
