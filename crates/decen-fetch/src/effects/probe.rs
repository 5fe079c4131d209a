use decen_verify::Digest;

use crate::core::document_url;
use crate::data::{CandidateServer, FetchOutcome, ProbeAttempt, ProbeReport, Selection};
use crate::effects::fetcher::ContentFetcher;
use crate::effects::http::HttpClient;

/// Ordered, stop-at-first-success scan over candidate servers.
///
/// Candidates are contacted one at a time in the order given. A failing
/// candidate is recorded and skipped, never retried. The first server to
/// serve the digest's document is selected and no later candidate is
/// contacted.
pub struct FailoverProbe<'f, C: HttpClient> {
    fetcher: &'f ContentFetcher<C>,
}

impl<'f, C: HttpClient> FailoverProbe<'f, C> {
    pub fn new(fetcher: &'f ContentFetcher<C>) -> Self { Self { fetcher } }

    pub async fn probe(&self, candidates: &[CandidateServer], digest: &Digest) -> ProbeReport {
        let mut report = ProbeReport::default();

        for server in candidates {
            let url = document_url(server.as_str(), digest);
            tracing::info!(server = %server, %url, "checking server");
            let outcome = self.fetcher.fetch(&url).await;

            report.attempts.push(ProbeAttempt {
                server: server.clone(),
                url,
                status: outcome.status(),
            });

            if let FetchOutcome::Success(body) = outcome {
                report.found_on.push(server.clone());
                if report.selected.is_none() {
                    tracing::info!(server = %server, bytes = body.len(), "document found");
                    report.selected = Some(Selection {
                        server: server.clone(),
                        body,
                    });
                }
            }

            if report.selected.is_some() {
                break;
            }
        }

        if !report.is_found() {
            tracing::warn!(%digest, candidates = candidates.len(), "document not found on any server");
        }
        report
    }
}
