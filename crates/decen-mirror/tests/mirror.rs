use std::path::Path;

use decen_fetch::core::document_url;
use decen_fetch::{CandidateServer, ContentFetcher, MockClient};
use decen_mirror::{AssetStatus, MirrorOrchestrator, RunOutcome, rewrite};
use decen_store::OriginRecord;
use decen_verify::Digest;
use tempfile::tempdir;

const PAGE: &str = r#"<html>
<link rel="stylesheet" href="/css/site.css">
<img src="img/logo.png">
<img src='data:image/gif;base64,R0lGOD'>
<script src="https://cdn.example/lib.js"></script>
<a href="other.html">next</a>
</html>"#;

fn servers(names: &[&str]) -> Vec<CandidateServer> {
    names.iter().map(|n| CandidateServer::parse(n).unwrap()).collect()
}

fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let path = entry.unwrap().path();
            if path.is_dir() { file_count(&path) } else { 1 }
        })
        .sum()
}

fn page_client(server: &str, digest: &Digest) -> MockClient {
    MockClient::new()
        .with_body(document_url(server, digest), PAGE)
        .with_body(format!("{server}/css/site.css"), "body{}")
        .with_body(format!("{server}/data/{digest}/img/logo.png"), "png")
        .with_body("https://cdn.example/lib.js", "js()")
}

#[tokio::test]
async fn failover_selects_the_only_serving_server() {
    let dir = tempdir().unwrap();
    let d = Digest::resolve("failover");
    let client = page_client("http://b.example", &d)
        .with_failure(document_url("http://a.example", &d), "connection refused")
        .with_body(document_url("http://c.example", &d), "<p>c</p>");
    let mirror = MirrorOrchestrator::new(
        ContentFetcher::new(client),
        dir.path().join("cache"),
        dir.path().join("store"),
    );
    let list = servers(&["http://a.example", "http://b.example", "http://c.example"]);

    let report = mirror.run(&d, Some(list.as_slice())).await.unwrap();

    assert_eq!(report.found_on, servers(&["http://b.example"]));
    assert_eq!(report.attempts.len(), 2);
    assert!(report.outcome.is_done());
    let requests = mirror.fetcher().client().requests();
    assert!(requests.iter().all(|url| !url.starts_with("http://c.example")));

    let cached = std::fs::read_to_string(report.index_path.as_ref().unwrap()).unwrap();
    assert!(cached.contains(r#"href="http://b.example/css/site.css""#));
    assert!(cached.contains(&format!(r#"src="http://b.example/data/{d}/img/logo.png""#)));
    assert!(cached.contains(r#"src="https://cdn.example/lib.js""#));
    assert!(cached.contains("src='data:image/gif;base64,R0lGOD'"));

    assert_eq!(report.summary.downloaded, 3);
    assert_eq!(report.summary.failed, 0);
    assert_eq!(report.summary.bytes_downloaded, 6 + 3 + 4);
}

#[tokio::test]
async fn second_run_replays_cache_without_downloads() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("store");
    let d = Digest::resolve("idempotent");
    let list = servers(&["http://b.example"]);

    let first = MirrorOrchestrator::new(
        ContentFetcher::new(page_client("http://b.example", &d)),
        dir.path().join("cache"),
        &store,
    );
    let report = first.run(&d, Some(list.as_slice())).await.unwrap();
    assert_eq!(report.summary.downloaded, 3);
    let files = file_count(&store);

    let second = MirrorOrchestrator::new(
        ContentFetcher::new(page_client("http://b.example", &d)),
        dir.path().join("cache"),
        &store,
    );
    let replay = second.run(&d, None).await.unwrap();

    assert_eq!(
        replay.outcome,
        RunOutcome::CacheHit {
            origin: Some("http://b.example".to_string())
        }
    );
    assert_eq!(replay.summary.downloaded, 0);
    assert_eq!(replay.summary.already_existing, 3);
    assert!(replay.assets.downloaded.iter().all(|r| r.status == AssetStatus::AlreadyExists));
    assert_eq!(file_count(&store), files);
    assert!(second.fetcher().client().requests().is_empty());
}

#[tokio::test]
async fn hello_on_a_404_server_finds_nothing() {
    let dir = tempdir().unwrap();
    let d = Digest::resolve("hello");
    assert_eq!(
        d.as_str(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    let mirror = MirrorOrchestrator::new(
        ContentFetcher::new(MockClient::new()),
        dir.path().join("cache"),
        dir.path().join("store"),
    );

    let report = mirror
        .run(&d, Some(servers(&["https://only.example"]).as_slice()))
        .await
        .unwrap();

    assert_eq!(report.outcome, RunOutcome::NotFound);
    assert!(report.found_on.is_empty());
    assert_eq!(report.summary.downloaded, 0);
    assert!(report.assets.is_empty());
    assert!(!mirror.cache().index_file(&d).exists());
}

#[tokio::test]
async fn cache_hit_uses_recorded_origin_for_relative_assets() {
    let dir = tempdir().unwrap();
    let d = Digest::resolve("replay");
    let mirror = MirrorOrchestrator::new(
        ContentFetcher::new(
            MockClient::new().with_body(format!("https://origin.example/data/{d}/a.png"), "a"),
        ),
        dir.path().join("cache"),
        dir.path().join("store"),
    );
    std::fs::create_dir_all(mirror.cache().digest_dir(&d)).unwrap();
    std::fs::write(mirror.cache().index_file(&d), r#"<img src="a.png">"#).unwrap();
    OriginRecord::new(d.clone(), "https://origin.example")
        .save(mirror.cache().origin_file(&d))
        .unwrap();

    let report = mirror.run(&d, None).await.unwrap();

    assert_eq!(report.summary.downloaded, 1);
    assert!(dir.path().join("store").join("a").join("a.png").is_file());
}

#[test]
fn rewrite_scenarios() {
    let d = Digest::resolve("d");
    assert_eq!(
        rewrite(br#"<img src="/img/a.png">"#, "https://example.org", &d),
        br#"<img src="https://example.org/img/a.png">"#
    );
    assert_eq!(
        rewrite(br#"<img src="a.png">"#, "https://example.org", &d),
        format!(r#"<img src="https://example.org/data/{d}/a.png">"#).into_bytes()
    );
}
