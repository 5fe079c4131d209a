//! I/O: the HTTP seam, the bounded fetcher, and the failover probe.

mod fetcher;
mod http;
mod mock;
mod probe;

pub use fetcher::ContentFetcher;
pub use http::{HttpClient, HttpResponse};
pub use mock::{MockClient, MockError};
pub use probe::FailoverProbe;

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
