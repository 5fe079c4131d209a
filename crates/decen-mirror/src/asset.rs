use std::collections::HashSet;
use std::path::{Path, PathBuf};

use decen_fetch::{ContentFetcher, HttpClient};
use decen_fs::{AtomicWriteOptions, atomic_write, group_name, sanitize_filename};
use decen_verify::Digest;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::Url;

use crate::error::AssetError;
use crate::link::{LinkReference, extract};

const DIRECTORY_FILE: &str = "index.html";
const FALLBACK_FILE: &str = "file.txt";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Downloaded,
    AlreadyExists,
    Failed,
}

/// What happened to one unique asset URL during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetRecord {
    pub source_url: String,
    /// `None` when the URL could not be mapped to a local file.
    pub local_path: Option<PathBuf>,
    /// Bytes written, or the on-disk size of an existing file.
    pub byte_size: u64,
    pub status: AssetStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl AssetRecord {
    fn ok(source_url: &str, local_path: PathBuf, byte_size: u64, status: AssetStatus) -> Self {
        Self {
            source_url: source_url.to_string(),
            local_path: Some(local_path),
            byte_size,
            status,
            error_detail: None,
        }
    }

    fn failed(source_url: &str, local_path: Option<PathBuf>, error: AssetError) -> Self {
        tracing::warn!(url = source_url, %error, "asset not mirrored");
        Self {
            source_url: source_url.to_string(),
            local_path,
            byte_size: 0,
            status: AssetStatus::Failed,
            error_detail: Some(error.to_string()),
        }
    }
}

/// Per-run asset outcomes. `downloaded` also holds files that were already
/// on disk; both lists keep encounter order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub downloaded: Vec<AssetRecord>,
    pub failed: Vec<AssetRecord>,
}

impl SyncReport {
    fn push(&mut self, record: AssetRecord) {
        match record.status {
            AssetStatus::Failed => self.failed.push(record),
            AssetStatus::Downloaded | AssetStatus::AlreadyExists => self.downloaded.push(record),
        }
    }

    pub fn is_empty(&self) -> bool { self.downloaded.is_empty() && self.failed.is_empty() }

    pub fn records(&self) -> impl Iterator<Item = &AssetRecord> {
        self.downloaded.iter().chain(self.failed.iter())
    }

    pub fn summary(&self) -> MirrorSummary {
        let mut summary = MirrorSummary {
            failed: self.failed.len(),
            ..MirrorSummary::default()
        };
        for record in &self.downloaded {
            match record.status {
                AssetStatus::Downloaded => {
                    summary.downloaded += 1;
                    summary.bytes_downloaded += record.byte_size;
                }
                AssetStatus::AlreadyExists => summary.already_existing += 1,
                AssetStatus::Failed => {}
            }
        }
        summary
    }
}

/// Counts for one run. Only fresh downloads contribute bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MirrorSummary {
    pub downloaded: usize,
    pub already_existing: usize,
    pub failed: usize,
    pub bytes_downloaded: u64,
}

/// Pulls every asset a document references into `<store_root>/<group>/<file>`.
///
/// Assets are handled one at a time in document order, each URL at most once
/// per call. Existing files are never fetched again, and one asset failing
/// never affects another.
pub struct AssetSynchronizer<'f, C: HttpClient> {
    fetcher: &'f ContentFetcher<C>,
}

impl<'f, C: HttpClient> AssetSynchronizer<'f, C> {
    pub fn new(fetcher: &'f ContentFetcher<C>) -> Self { Self { fetcher } }

    pub async fn sync(
        &self,
        html: &[u8],
        origin: &str,
        digest: &Digest,
        store_root: &Path,
    ) -> SyncReport {
        let mut report = SyncReport::default();

        if let Err(e) = decen_fs::ensure_dir(store_root) {
            report.push(AssetRecord::failed("", None, e.into()));
            return report;
        }

        let mut seen = HashSet::new();
        for reference in extract(html, origin, digest).filter(LinkReference::is_asset) {
            if !seen.insert(reference.resolved.clone()) {
                continue;
            }
            report.push(self.mirror(&reference.resolved, store_root).await);
        }

        let summary = report.summary();
        tracing::info!(
            downloaded = summary.downloaded,
            existing = summary.already_existing,
            failed = summary.failed,
            "asset sync finished"
        );
        report
    }

    async fn mirror(&self, source_url: &str, store_root: &Path) -> AssetRecord {
        let (dir, file_name) = match locate(source_url, store_root) {
            Ok(target) => target,
            Err(e) => return AssetRecord::failed(source_url, None, e),
        };
        let local_path = dir.join(file_name);

        match self.store(source_url, &dir, &local_path).await {
            Ok((status, size)) => AssetRecord::ok(source_url, local_path, size, status),
            Err(e) => AssetRecord::failed(source_url, Some(local_path), e),
        }
    }

    async fn store(
        &self,
        source_url: &str,
        dir: &Path,
        local_path: &Path,
    ) -> Result<(AssetStatus, u64), AssetError> {
        decen_fs::ensure_dir(dir)?;

        if let Some(size) = decen_fs::file_size(local_path)? {
            tracing::debug!(path = %local_path.display(), size, "asset already present");
            return Ok((AssetStatus::AlreadyExists, size));
        }

        let body = self.fetcher.fetch(source_url).await.into_result()?;
        atomic_write(local_path, &body, AtomicWriteOptions::new())?;
        tracing::debug!(path = %local_path.display(), bytes = body.len(), "asset saved");
        Ok((AssetStatus::Downloaded, body.len() as u64))
    }
}

/// Group directory and file name for an asset URL.
fn locate(source_url: &str, store_root: &Path) -> Result<(PathBuf, String), AssetError> {
    let url = Url::parse(source_url).map_err(|e| AssetError::Parse {
        url: source_url.to_string(),
        reason: e.to_string(),
    })?;
    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    Ok((store_root.join(group_name(&path)), local_file_name(&path)))
}

/// Sanitized last segment of a decoded URL path, with fallbacks for empty
/// names.
pub fn local_file_name(url_path: &str) -> String {
    let name = sanitize_filename(url_path);
    if !name.is_empty() {
        name
    } else if url_path.ends_with('/') {
        DIRECTORY_FILE.to_string()
    } else {
        FALLBACK_FILE.to_string()
    }
}
