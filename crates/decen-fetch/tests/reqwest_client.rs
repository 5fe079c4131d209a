use std::time::Duration;

use decen_fetch::{CandidateServer, ContentFetcher, FailoverProbe, FetchOptions, FetchOutcome, ReqwestClient};
use decen_verify::Digest;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve canned HTTP/1.1 responses keyed by request path until dropped.
async fn serve(routes: Vec<(String, u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else { return };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "not here"));
                let reply = format!(
                    "HTTP/1.1 {status} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

fn fetcher() -> ContentFetcher<ReqwestClient> {
    let options = FetchOptions::default().timeout(Duration::from_secs(5));
    ContentFetcher::new(ReqwestClient::new(&options).unwrap()).with_options(options)
}

#[tokio::test]
async fn reqwest_success_and_status() {
    let base = serve(vec![("/ok".to_string(), 200, "payload")]).await;
    let fetcher = fetcher();

    assert_eq!(
        fetcher.fetch(&format!("{base}/ok")).await,
        FetchOutcome::Success("payload".into())
    );
    assert_eq!(
        fetcher.fetch(&format!("{base}/missing")).await,
        FetchOutcome::StatusError(404)
    );
}

#[tokio::test]
async fn reqwest_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let outcome = fetcher().fetch(&format!("http://{addr}/x")).await;
    assert!(matches!(outcome, FetchOutcome::TransportError(_)), "{outcome:?}");
}

#[tokio::test]
async fn hello_digest_on_404_server_is_not_found() {
    let digest = Digest::resolve("hello");
    assert_eq!(
        digest.as_str(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    let base = serve(Vec::new()).await;
    let candidates = vec![CandidateServer::parse(&base).unwrap()];

    let fetcher = fetcher();
    let report = FailoverProbe::new(&fetcher).probe(&candidates, &digest).await;

    assert!(report.found_on.is_empty());
    assert!(report.selected.is_none());
    assert_eq!(report.attempts.len(), 1);
}
