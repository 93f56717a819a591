use crate::io::fetcher::SuggestionFetcher;
use crate::ops::widget::WidgetEvent;

/// Start the lookups a widget asked for.
pub fn issue(fetcher: &SuggestionFetcher, fetches: &[(u64, String)]) {
    for (seq, query) in fetches {
        fetcher.request(*seq, query);
    }
}

/// Turn finished lookups into widget events. Failures of every kind
/// become `LookupFailed`; the widget decides whether they still matter.
pub fn drain(fetcher: &SuggestionFetcher) -> Vec<WidgetEvent> {
    fetcher
        .poll()
        .into_iter()
        .map(|r| match r.result {
            Ok(suggestions) => WidgetEvent::Results {
                seq: r.seq,
                suggestions,
            },
            Err(e) => WidgetEvent::LookupFailed {
                seq: r.seq,
                reason: e.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::io::http::GalleryClient;
    use crate::model::{Category, LookupScope, ServerConfig};
    use crate::ops::forms::TagForm;
    use mockito::{Matcher, Server};

    fn drain_until(fetcher: &SuggestionFetcher, n: usize) -> Vec<WidgetEvent> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut events = Vec::new();
        while events.len() < n && Instant::now() < deadline {
            events.extend(drain(fetcher));
            std::thread::sleep(Duration::from_millis(10));
        }
        events
    }

    #[test]
    fn person_lookup_reaches_the_form() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/ac/person")
            .match_query(Matcher::UrlEncoded("q".into(), "par".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"["Parker","Paris"]"#)
            .create();
        let client = GalleryClient::new(&ServerConfig {
            url: server.url(),
            ..Default::default()
        })
        .unwrap();
        let fetcher = SuggestionFetcher::new(
            client,
            rt.handle().clone(),
            LookupScope::Category(Category::Person),
            Duration::from_secs(2),
        );

        let mut form = TagForm::new(Category::Person, 1);
        let (_, applied) = form.dispatch(WidgetEvent::SetText("par".into()));
        issue(&fetcher, &applied.fetches);
        for event in drain_until(&fetcher, 1) {
            form.dispatch(event);
        }

        let texts: Vec<&str> = form
            .widget
            .list()
            .items()
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Parker", "Paris"]);
    }

    #[test]
    fn server_error_becomes_lookup_failed() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/ac")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();
        let client = GalleryClient::new(&ServerConfig {
            url: server.url(),
            ..Default::default()
        })
        .unwrap();
        let fetcher = SuggestionFetcher::new(
            client,
            rt.handle().clone(),
            LookupScope::Global,
            Duration::from_secs(2),
        );
        issue(&fetcher, &[(7, "stock".to_string())]);
        let events = drain_until(&fetcher, 1);
        assert!(matches!(
            events.as_slice(),
            [WidgetEvent::LookupFailed { seq: 7, .. }]
        ));
    }
}
