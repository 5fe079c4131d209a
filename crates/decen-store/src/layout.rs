use std::path::{Path, PathBuf};

use decen_verify::Digest;

pub const INDEX_FILE: &str = "index.html";
pub const ORIGIN_FILE: &str = "origin.json";

/// Path arithmetic for a digest-keyed directory tree.
///
/// ```text
/// <root>/<digest>/<digest>.<ext>
/// <root>/<digest>/index.html
/// <root>/<digest>/origin.json
/// <root>/<group>/<file>
/// ```
///
/// The same shape serves the content store, the category store, and the
/// mirror's document cache; they differ only in which root is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
}

impl StoreLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }

    pub fn root(&self) -> &Path { &self.root }

    pub fn digest_dir(&self, digest: &Digest) -> PathBuf { self.root.join(digest.as_str()) }

    pub fn index_file(&self, digest: &Digest) -> PathBuf {
        self.digest_dir(digest).join(INDEX_FILE)
    }

    pub fn origin_file(&self, digest: &Digest) -> PathBuf {
        self.digest_dir(digest).join(ORIGIN_FILE)
    }

    pub fn content_file(&self, digest: &Digest, ext: &str) -> PathBuf {
        self.digest_dir(digest).join(content_file_name(digest, ext))
    }

    pub fn asset_dir(&self, group: &str) -> PathBuf { self.root.join(group) }
}

/// `<digest>.<ext>`, or the bare digest when there is no extension.
pub fn content_file_name(digest: &Digest, ext: &str) -> String {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        digest.to_string()
    } else {
        format!("{digest}.{ext}")
    }
}
