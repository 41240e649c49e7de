//! Logging adapter between the transport's raw event stream and the
//! application callback.
//!
//! # Design
//! `LoggingCallback` forwards every event verbatim, 1:1 and on the
//! transport's delivery thread; it never reorders, buffers, or coalesces.
//! Logging is purely diagnostic: a per-instance flag (injected at
//! construction, no global state) decides whether each event also emits a
//! structured debug line carrying the resolved URL and a correlation id,
//! so the lines of one dispatch can be picked out of interleaved output.

use std::error::Error;

use uuid::Uuid;

use crate::callback::Callback;

/// Longest response-body prefix that ends up in a log line.
const BODY_PREVIEW_LIMIT: usize = 256;

/// Wraps an application [`Callback`], logging each event before forwarding.
pub struct LoggingCallback {
    inner: Box<dyn Callback + Send>,
    url: String,
    request_id: Uuid,
    debug: bool,
}

impl LoggingCallback {
    /// Wrap `inner` for one dispatch of `url`. `debug` controls whether the
    /// adapter logs at all; a fresh correlation id is stamped per instance.
    pub fn new(inner: Box<dyn Callback + Send>, url: String, debug: bool) -> Self {
        Self {
            inner,
            url,
            request_id: Uuid::new_v4(),
            debug,
        }
    }
}

impl Callback for LoggingCallback {
    fn on_start(&mut self) {
        if self.debug {
            tracing::debug!(request = %self.request_id, url = %self.url, "on_start");
        }
        self.inner.on_start();
    }

    fn on_progress(&mut self, received: u64, total: u64) {
        if self.debug {
            tracing::debug!(
                request = %self.request_id,
                url = %self.url,
                received,
                total,
                "on_progress"
            );
        }
        self.inner.on_progress(received, total);
    }

    fn on_retry(&mut self, attempt: u32) {
        if self.debug {
            tracing::debug!(request = %self.request_id, url = %self.url, attempt, "on_retry");
        }
        self.inner.on_retry(attempt);
    }

    fn on_success(&mut self, status: u16, headers: &[(String, String)], body: &[u8]) {
        if self.debug {
            tracing::debug!(
                request = %self.request_id,
                url = %self.url,
                status,
                body = %preview(body),
                "on_success"
            );
        }
        self.inner.on_success(status, headers, body);
    }

    fn on_failure(
        &mut self,
        status: u16,
        headers: &[(String, String)],
        body: &[u8],
        cause: &(dyn Error + Send + Sync),
    ) {
        if self.debug {
            tracing::debug!(
                request = %self.request_id,
                url = %self.url,
                status,
                body = %preview(body),
                error = %error_chain(cause),
                "on_failure"
            );
        }
        self.inner.on_failure(status, headers, body, cause);
    }

    fn on_cancel(&mut self) {
        if self.debug {
            tracing::debug!(request = %self.request_id, url = %self.url, "on_cancel");
        }
        self.inner.on_cancel();
    }

    fn on_finish(&mut self) {
        if self.debug {
            tracing::debug!(request = %self.request_id, url = %self.url, "on_finish");
        }
        self.inner.on_finish();
    }
}

/// Lossy, bounded rendering of a response body for log lines.
fn preview(body: &[u8]) -> String {
    let end = body.len().min(BODY_PREVIEW_LIMIT);
    let mut text = String::from_utf8_lossy(&body[..end]).into_owned();
    if body.len() > BODY_PREVIEW_LIMIT {
        text.push_str("...");
    }
    text
}

/// Render an error and every `source()` below it on one line.
fn error_chain(err: &(dyn Error + Send + Sync)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Start,
        Progress(u64, u64),
        Retry(u32),
        Success(u16, Vec<(String, String)>, Vec<u8>),
        Failure(u16, Vec<(String, String)>, Vec<u8>, String),
        Cancel,
        Finish,
    }

    struct Recorder {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl Callback for Recorder {
        fn on_start(&mut self) {
            self.events.lock().unwrap().push(Event::Start);
        }

        fn on_progress(&mut self, received: u64, total: u64) {
            self.events
                .lock()
                .unwrap()
                .push(Event::Progress(received, total));
        }

        fn on_retry(&mut self, attempt: u32) {
            self.events.lock().unwrap().push(Event::Retry(attempt));
        }

        fn on_success(&mut self, status: u16, headers: &[(String, String)], body: &[u8]) {
            self.events.lock().unwrap().push(Event::Success(
                status,
                headers.to_vec(),
                body.to_vec(),
            ));
        }

        fn on_failure(
            &mut self,
            status: u16,
            headers: &[(String, String)],
            body: &[u8],
            cause: &(dyn Error + Send + Sync),
        ) {
            self.events.lock().unwrap().push(Event::Failure(
                status,
                headers.to_vec(),
                body.to_vec(),
                cause.to_string(),
            ));
        }

        fn on_cancel(&mut self) {
            self.events.lock().unwrap().push(Event::Cancel);
        }

        fn on_finish(&mut self) {
            self.events.lock().unwrap().push(Event::Finish);
        }
    }

    fn adapter(debug: bool) -> (LoggingCallback, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder {
            events: events.clone(),
        };
        let adapter = LoggingCallback::new(
            Box::new(recorder),
            "http://api.test.com/v1/users".to_string(),
            debug,
        );
        (adapter, events)
    }

    #[test]
    fn forwards_all_events_in_order_with_identical_payloads() {
        let (mut adapter, events) = adapter(true);
        let headers = vec![("content-type".to_string(), "text/plain".to_string())];

        adapter.on_start();
        adapter.on_progress(3, 10);
        adapter.on_retry(1);
        adapter.on_success(200, &headers, b"hello");
        adapter.on_finish();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Event::Start,
                Event::Progress(3, 10),
                Event::Retry(1),
                Event::Success(200, headers, b"hello".to_vec()),
                Event::Finish,
            ]
        );
    }

    #[test]
    fn forwards_failure_with_cause() {
        let (mut adapter, events) = adapter(true);
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

        adapter.on_start();
        adapter.on_failure(0, &[], b"", &cause);
        adapter.on_finish();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        match &recorded[1] {
            Event::Failure(0, headers, body, message) => {
                assert!(headers.is_empty());
                assert!(body.is_empty());
                assert!(message.contains("refused"));
            }
            other => panic!("expected failure event, got {other:?}"),
        }
    }

    #[test]
    fn cancel_forwards_before_finish() {
        let (mut adapter, events) = adapter(true);

        adapter.on_start();
        adapter.on_cancel();
        adapter.on_finish();

        assert_eq!(
            *events.lock().unwrap(),
            vec![Event::Start, Event::Cancel, Event::Finish]
        );
    }

    #[test]
    fn forwarding_is_unaffected_by_disabled_logging() {
        let (mut adapter, events) = adapter(false);

        adapter.on_start();
        adapter.on_success(204, &[], b"");
        adapter.on_finish();

        assert_eq!(events.lock().unwrap().len(), 3);
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let body = vec![b'x'; BODY_PREVIEW_LIMIT + 100];
        let text = preview(&body);
        assert_eq!(text.len(), BODY_PREVIEW_LIMIT + 3);
        assert!(text.ends_with("..."));
        assert_eq!(preview(b"short"), "short");
    }

    #[test]
    fn error_chain_includes_sources() {
        #[derive(Debug)]
        struct Outer(std::io::Error);

        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "request failed")
            }
        }

        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }

        let outer = Outer(std::io::Error::other("connection reset"));
        assert_eq!(error_chain(&outer), "request failed: connection reset");
    }
}
