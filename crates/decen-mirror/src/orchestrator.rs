use std::path::{Path, PathBuf};

use decen_fetch::{
    CandidateServer, ContentFetcher, FailoverProbe, HttpClient, ProbeAttempt, Selection,
};
use decen_fs::{AtomicWriteOptions, atomic_write};
use decen_store::{OriginRecord, StoreLayout};
use decen_verify::Digest;
use serde::Serialize;

use crate::asset::{AssetSynchronizer, MirrorSummary, SyncReport};
use crate::config::MirrorConfig;
use crate::error::Result;
use crate::link::rewrite;

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The document was already cached; `origin` is `None` when no origin
    /// record existed and relative references could not be resolved.
    CacheHit { origin: Option<String> },
    /// Fetched from `server`, rewritten, and cached.
    Mirrored { server: CandidateServer },
    /// Every candidate was tried and none served the document.
    NotFound,
    /// Cache miss with no server list to probe.
    NoServers,
    /// Fetched from `server` but could not be written to the cache.
    PersistFailed { server: CandidateServer, detail: String },
}

impl RunOutcome {
    /// Whether the run reached the asset stage.
    pub fn is_done(&self) -> bool { matches!(self, Self::CacheHit { .. } | Self::Mirrored { .. }) }
}

/// Everything one run observed, suitable for tables or JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MirrorReport {
    pub digest: Digest,
    pub outcome: RunOutcome,
    pub found_on: Vec<CandidateServer>,
    pub attempts: Vec<ProbeAttempt>,
    /// Cached document, when one exists after the run.
    pub index_path: Option<PathBuf>,
    pub assets: SyncReport,
    pub summary: MirrorSummary,
}

impl MirrorReport {
    fn new(digest: &Digest, outcome: RunOutcome) -> Self {
        Self {
            digest: digest.clone(),
            outcome,
            found_on: Vec::new(),
            attempts: Vec::new(),
            index_path: None,
            assets: SyncReport::default(),
            summary: MirrorSummary::default(),
        }
    }

    fn with_assets(mut self, assets: SyncReport) -> Self {
        self.summary = assets.summary();
        self.assets = assets;
        self
    }
}

/// Drives one digest from cache check through asset sync.
///
/// ```text
/// CacheCheck -> CacheHit -> AssetSync -> Done
/// CacheCheck -> CacheMiss -> Probing -> Found -> Persist -> AssetSync -> Done
///                                    -> NotFound -> Done
/// ```
pub struct MirrorOrchestrator<C: HttpClient> {
    fetcher: ContentFetcher<C>,
    cache: StoreLayout,
    store_root: PathBuf,
}

impl<C: HttpClient> MirrorOrchestrator<C> {
    pub fn new(
        fetcher: ContentFetcher<C>,
        cache_root: impl Into<PathBuf>,
        store_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            cache: StoreLayout::new(cache_root),
            store_root: store_root.into(),
        }
    }

    /// Roots and fetch options from `config`, requests through `client`.
    pub fn from_config(client: C, config: &MirrorConfig) -> Self {
        let fetcher = ContentFetcher::new(client).with_options(config.fetch_options());
        Self::new(fetcher, config.cache_root.clone(), config.store_root.clone())
    }

    pub fn fetcher(&self) -> &ContentFetcher<C> { &self.fetcher }

    pub fn cache(&self) -> &StoreLayout { &self.cache }

    pub fn store_root(&self) -> &Path { &self.store_root }

    /// Mirror `digest`. `servers` is only consulted on a cache miss.
    ///
    /// Per-server and per-asset failures are part of the report. `Err` means
    /// the cache could not be created or a cached document could not be read.
    pub async fn run(
        &self,
        digest: &Digest,
        servers: Option<&[CandidateServer]>,
    ) -> Result<MirrorReport> {
        decen_fs::ensure_dir(self.cache.root())?;

        let index_path = self.cache.index_file(digest);
        if decen_fs::file_size(&index_path)?.is_some() {
            return self.replay(digest, index_path).await;
        }
        tracing::info!(%digest, "not cached");

        let Some(servers) = servers else {
            tracing::warn!(%digest, "cache miss and no server list");
            return Ok(MirrorReport::new(digest, RunOutcome::NoServers));
        };

        let probe = FailoverProbe::new(&self.fetcher).probe(servers, digest).await;
        let Some(Selection { server, body }) = probe.selected else {
            let mut report = MirrorReport::new(digest, RunOutcome::NotFound);
            report.attempts = probe.attempts;
            return Ok(report);
        };

        let mut report = match self.persist(digest, &server, &body) {
            Ok(path) => {
                tracing::info!(%digest, %server, path = %path.display(), "document cached");
                let outcome = RunOutcome::Mirrored {
                    server: server.clone(),
                };
                let mut report = MirrorReport::new(digest, outcome);
                report.index_path = Some(path);
                report
            }
            Err(e) => {
                tracing::warn!(%digest, %server, error = %e, "failed to cache document");
                MirrorReport::new(
                    digest,
                    RunOutcome::PersistFailed {
                        server,
                        detail: e.to_string(),
                    },
                )
            }
        };
        report.found_on = probe.found_on;
        report.attempts = probe.attempts;

        let RunOutcome::Mirrored { server } = &report.outcome else {
            return Ok(report);
        };
        let assets = AssetSynchronizer::new(&self.fetcher)
            .sync(&body, server.as_str(), digest, &self.store_root)
            .await;
        Ok(report.with_assets(assets))
    }

    async fn replay(&self, digest: &Digest, index_path: PathBuf) -> Result<MirrorReport> {
        tracing::info!(%digest, path = %index_path.display(), "using cached document");
        let document = decen_fs::atomic_read(&index_path)?;

        let origin = match OriginRecord::load(self.cache.origin_file(digest)) {
            Ok(Some(record)) => Some(record.server),
            Ok(None) => {
                tracing::warn!(%digest, "no origin record; relative assets cannot be resolved");
                None
            }
            Err(e) => {
                tracing::warn!(%digest, error = %e, "ignoring unreadable origin record");
                None
            }
        };

        let assets = AssetSynchronizer::new(&self.fetcher)
            .sync(&document, origin.as_deref().unwrap_or_default(), digest, &self.store_root)
            .await;

        let mut report = MirrorReport::new(digest, RunOutcome::CacheHit { origin });
        report.index_path = Some(index_path);
        Ok(report.with_assets(assets))
    }

    /// Write the rewritten document and its origin record.
    fn persist(
        &self,
        digest: &Digest,
        server: &CandidateServer,
        document: &[u8],
    ) -> decen_store::Result<PathBuf> {
        decen_fs::ensure_dir(self.cache.digest_dir(digest))?;

        // Origin first: a cached index always has a record beside it.
        OriginRecord::new(digest.clone(), server.as_str()).save(self.cache.origin_file(digest))?;

        let path = self.cache.index_file(digest);
        let rewritten = rewrite(document, server.as_str(), digest);
        atomic_write(&path, &rewritten, AtomicWriteOptions::new())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decen_fetch::MockClient;
    use decen_fetch::core::document_url;
    use tempfile::tempdir;

    fn orchestrator(client: MockClient, root: &Path) -> MirrorOrchestrator<MockClient> {
        MirrorOrchestrator::new(ContentFetcher::new(client), root.join("cache"), root.join("store"))
    }

    #[tokio::test]
    async fn cache_miss_without_servers() {
        let dir = tempdir().unwrap();
        let mirror = orchestrator(MockClient::new(), dir.path());
        let report = mirror.run(&Digest::resolve("x"), None).await.unwrap();

        assert_eq!(report.outcome, RunOutcome::NoServers);
        assert!(!report.outcome.is_done());
        assert!(mirror.fetcher().client().requests().is_empty());
    }

    #[tokio::test]
    async fn persists_rewritten_document_and_origin() {
        let dir = tempdir().unwrap();
        let d = Digest::resolve("page");
        let server = CandidateServer::parse("https://origin.example").unwrap();
        let client = MockClient::new()
            .with_body(document_url(server.as_str(), &d), r#"<img src="logo.png">"#)
            .with_body(format!("https://origin.example/data/{d}/logo.png"), "png");
        let mirror = orchestrator(client, dir.path());

        let report = mirror.run(&d, Some(std::slice::from_ref(&server))).await.unwrap();

        assert_eq!(report.outcome, RunOutcome::Mirrored { server: server.clone() });
        let cached = std::fs::read_to_string(mirror.cache().index_file(&d)).unwrap();
        assert_eq!(cached, format!(r#"<img src="https://origin.example/data/{d}/logo.png">"#));
        let origin = OriginRecord::load(mirror.cache().origin_file(&d)).unwrap().unwrap();
        assert_eq!(origin.server, "https://origin.example");
        assert_eq!(report.summary.downloaded, 1);
        assert_eq!(report.summary.bytes_downloaded, 3);
    }

    #[tokio::test]
    async fn cached_document_keeps_non_utf8_bytes() {
        let dir = tempdir().unwrap();
        let d = Digest::resolve("latin1");
        let server = CandidateServer::parse("https://origin.example").unwrap();
        let body: &'static [u8] = b"<p>caf\xe9</p><img src=\"https://cdn.x/a.png\">";
        let client = MockClient::new()
            .with_body(document_url(server.as_str(), &d), body)
            .with_body("https://cdn.x/a.png", "png");
        let mirror = orchestrator(client, dir.path());

        let report = mirror.run(&d, Some(std::slice::from_ref(&server))).await.unwrap();

        assert!(report.outcome.is_done());
        assert_eq!(std::fs::read(mirror.cache().index_file(&d)).unwrap(), body);
        assert_eq!(report.summary.downloaded, 1);

        let replay = orchestrator(MockClient::new(), dir.path()).run(&d, None).await.unwrap();
        assert_eq!(replay.summary.already_existing, 1);
        assert_eq!(std::fs::read(mirror.cache().index_file(&d)).unwrap(), body);
    }

    #[tokio::test]
    async fn replay_skips_links_that_were_never_fetched() {
        let dir = tempdir().unwrap();
        let d = Digest::resolve("anchors");
        let server = CandidateServer::parse("https://origin.example").unwrap();
        let page = r##"<a href="#top">t</a><a href="mailto:x@y.z">m</a><img src="logo.png">"##;
        let client = MockClient::new()
            .with_body(document_url(server.as_str(), &d), page)
            .with_body(format!("https://origin.example/data/{d}/logo.png"), "png");
        let first = orchestrator(client, dir.path());
        let report = first.run(&d, Some(std::slice::from_ref(&server))).await.unwrap();
        assert_eq!(report.assets.records().count(), 1);

        let second = orchestrator(MockClient::new(), dir.path());
        let replay = second.run(&d, None).await.unwrap();

        assert_eq!(replay.assets.records().count(), 1);
        assert_eq!(replay.summary.already_existing, 1);
        assert!(second.fetcher().client().requests().is_empty());
    }

    #[tokio::test]
    async fn persist_failure_skips_asset_sync() {
        let dir = tempdir().unwrap();
        let d = Digest::resolve("page");
        let server = CandidateServer::parse("https://origin.example").unwrap();
        let client = MockClient::new()
            .with_body(document_url(server.as_str(), &d), r#"<img src="/a.png">"#);
        let mirror = orchestrator(client, dir.path());
        std::fs::create_dir_all(mirror.cache().origin_file(&d)).unwrap();

        let report = mirror.run(&d, Some(std::slice::from_ref(&server))).await.unwrap();

        assert!(matches!(report.outcome, RunOutcome::PersistFailed { .. }));
        assert!(!mirror.cache().index_file(&d).exists());
        assert_eq!(report.found_on.len(), 1);
        assert!(report.assets.is_empty());
        assert_eq!(mirror.fetcher().client().requests().len(), 1);
    }

    #[tokio::test]
    async fn cache_hit_without_origin_record_degrades() {
        let dir = tempdir().unwrap();
        let d = Digest::resolve("page");
        let mirror = orchestrator(MockClient::new(), dir.path());
        std::fs::create_dir_all(mirror.cache().digest_dir(&d)).unwrap();
        std::fs::write(mirror.cache().index_file(&d), r#"<img src="/a.png">"#).unwrap();

        let report = mirror.run(&d, None).await.unwrap();

        assert_eq!(report.outcome, RunOutcome::CacheHit { origin: None });
        assert_eq!(report.summary.failed, 1);
        assert!(mirror.fetcher().client().requests().is_empty());
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_string(&RunOutcome::NotFound).unwrap();
        assert_eq!(json, r#"{"kind":"not_found"}"#);
        let server = CandidateServer::parse("https://b.example").unwrap();
        let json = serde_json::to_string(&RunOutcome::Mirrored { server }).unwrap();
        assert_eq!(json, r#"{"kind":"mirrored","server":"https://b.example"}"#);
    }
}
