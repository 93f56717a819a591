use std::sync::mpsc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;

use crate::io::http::{GalleryClient, GalleryError};
use crate::model::{LookupScope, Suggestion};

/// A lookup result delivered back to the UI thread, tagged with the
/// sequence number of the request that produced it.
#[derive(Debug)]
pub struct LookupResult {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<Suggestion>, GalleryError>,
}

/// Issues suggestion lookups on the tokio runtime for one widget instance.
///
/// Requests are fire-and-forget; results queue up on a channel owned by
/// this fetcher and are drained by `poll()` on each UI tick. Deciding
/// whether a result is still current is the widget's job.
pub struct SuggestionFetcher {
    client: GalleryClient,
    runtime: Handle,
    scope: LookupScope,
    timeout: Duration,
    tx: mpsc::Sender<LookupResult>,
    rx: mpsc::Receiver<LookupResult>,
}

impl SuggestionFetcher {
    pub fn new(
        client: GalleryClient,
        runtime: Handle,
        scope: LookupScope,
        timeout: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        SuggestionFetcher {
            client,
            runtime,
            scope,
            timeout,
            tx,
            rx,
        }
    }

    /// Start one lookup. Never blocks.
    pub fn request(&self, seq: u64, query: &str) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        let scope = self.scope;
        let timeout = self.timeout;
        let query = query.to_string();
        debug!(seq, query = query.as_str(), "spawning lookup");
        self.runtime.spawn(async move {
            let result = client.suggest(scope, &query, timeout).await;
            // The receiver is gone once the widget is dropped; nothing to do then.
            let _ = tx.send(LookupResult { seq, query, result });
        });
    }

    /// Non-blocking poll for finished lookups, in completion order.
    pub fn poll(&self) -> Vec<LookupResult> {
        let mut results = Vec::new();
        while let Ok(r) = self.rx.try_recv() {
            results.push(r);
        }
        results
    }

    /// Block until one result arrives or `timeout` passes.
    pub fn wait(&self, timeout: Duration) -> Option<LookupResult> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, ServerConfig};
    use mockito::{Matcher, Server};

    fn fetcher(server: &Server, rt: &tokio::runtime::Runtime, timeout_ms: u64) -> SuggestionFetcher {
        let client = GalleryClient::new(&ServerConfig {
            url: server.url(),
            ..Default::default()
        })
        .unwrap();
        SuggestionFetcher::new(
            client,
            rt.handle().clone(),
            LookupScope::Category(Category::Tag),
            Duration::from_millis(timeout_ms),
        )
    }

    #[test]
    fn result_carries_request_sequence() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/ac/tag")
            .match_query(Matcher::UrlEncoded("q".into(), "se".into()))
            .with_status(200)
            .with_body(r#"["sea","seal"]"#)
            .create();

        let f = fetcher(&server, &rt, 2_000);
        f.request(7, "se");
        let got = f.wait(Duration::from_secs(5)).expect("lookup result");
        assert_eq!(got.seq, 7);
        assert_eq!(got.query, "se");
        assert_eq!(got.result.unwrap().len(), 2);
    }

    #[test]
    fn server_error_is_delivered_not_dropped() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/ac/tag")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let f = fetcher(&server, &rt, 2_000);
        f.request(1, "x");
        let got = f.wait(Duration::from_secs(5)).expect("lookup result");
        assert!(matches!(got.result, Err(GalleryError::Status { status: 500 })));
    }

    #[test]
    fn poll_is_empty_without_requests() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let server = Server::new();
        assert!(fetcher(&server, &rt, 100).poll().is_empty());
    }
}
