//! Default [`Transport`] backed by `ureq`, one worker thread per request.
//!
//! # Design
//! A shared blocking agent executes each request on a spawned thread and
//! drives the handler from there: `on_start`, chunked body reads surfaced
//! as `on_progress`, one terminal event, `on_finish`. Non-2xx statuses are
//! read as data (`http_status_as_error(false)`) and delivered through
//! `on_failure` with the full response attached; transport-level errors
//! (DNS, connect, read) are delivered with status 0. This engine performs
//! no retries and exposes no cancellation, so it never emits
//! `on_retry`/`on_cancel`.

use std::fmt;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime};

use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::callback::Callback;
use crate::error::TlsError;
use crate::request::Method;
use crate::store::{Cookie, CookieStore};
use crate::transport::{TlsOptions, Transport};

const READ_CHUNK: usize = 8 * 1024;

/// Worker-thread transport over a blocking `ureq` agent.
pub struct ThreadTransport {
    agent: Mutex<Agent>,
    cookie_store: Mutex<Option<Arc<dyn CookieStore>>>,
}

impl ThreadTransport {
    pub fn new() -> Self {
        Self {
            agent: Mutex::new(build_agent(TlsOptions::default())),
            cookie_store: Mutex::new(None),
        }
    }
}

impl Default for ThreadTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ThreadTransport {
    fn get(&self, url: &str, params: &[(String, String)], handler: Box<dyn Callback + Send>) {
        self.spawn(Method::Get, url, params, handler);
    }

    fn post(&self, url: &str, params: &[(String, String)], handler: Box<dyn Callback + Send>) {
        self.spawn(Method::Post, url, params, handler);
    }

    fn configure_tls(&self, options: TlsOptions) -> Result<(), TlsError> {
        *self.agent.lock().unwrap() = build_agent(options);
        Ok(())
    }

    fn set_cookie_store(&self, store: Arc<dyn CookieStore>) {
        *self.cookie_store.lock().unwrap() = Some(store);
    }
}

impl ThreadTransport {
    fn spawn(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        mut handler: Box<dyn Callback + Send>,
    ) {
        let agent = self.agent.lock().unwrap().clone();
        let store = self.cookie_store.lock().unwrap().clone();
        let url = url.to_string();
        let params = params.to_vec();

        thread::spawn(move || {
            handler.on_start();
            match exchange(&agent, store.as_deref(), method, &url, &params, handler.as_mut()) {
                Ok((status, headers, body)) => {
                    if let Some(store) = &store {
                        record_cookies(store.as_ref(), &headers);
                    }
                    if (200..300).contains(&status) {
                        handler.on_success(status, &headers, &body);
                    } else {
                        let cause = FetchError::Status(status);
                        handler.on_failure(status, &headers, &body, &cause);
                    }
                }
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "request did not complete");
                    handler.on_failure(0, &[], &[], &err);
                }
            }
            handler.on_finish();
        });
    }
}

fn build_agent(options: TlsOptions) -> Agent {
    let disable = options.accept_invalid_certs || options.accept_invalid_hostnames;
    Agent::config_builder()
        .http_status_as_error(false)
        .tls_config(TlsConfig::builder().disable_verification(disable).build())
        .build()
        .new_agent()
}

/// Run one request to completion, emitting `on_progress` as the body
/// arrives. Returns the status, headers, and full body.
fn exchange(
    agent: &Agent,
    store: Option<&dyn CookieStore>,
    method: Method,
    url: &str,
    params: &[(String, String)],
    handler: &mut (dyn Callback + Send),
) -> Result<(u16, Vec<(String, String)>, Vec<u8>), FetchError> {
    let cookies = store.map(cookie_header).filter(|header| !header.is_empty());

    let mut response = match method {
        Method::Get => {
            let mut request = agent.get(url);
            for (key, value) in params {
                request = request.query(key, value);
            }
            if let Some(cookies) = &cookies {
                request = request.header("cookie", cookies);
            }
            request.call()?
        }
        Method::Post => {
            let mut request = agent.post(url);
            if let Some(cookies) = &cookies {
                request = request.header("cookie", cookies);
            }
            request.send_form(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?
        }
    };

    let status = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let total: u64 = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0);

    let mut body = Vec::new();
    let mut reader = response.body_mut().as_reader();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
        handler.on_progress(body.len() as u64, total);
    }

    Ok((status, headers, body))
}

/// `Cookie` request-header value from the unexpired cookies in `store`.
fn cookie_header(store: &dyn CookieStore) -> String {
    let now = SystemTime::now();
    store
        .cookies()
        .iter()
        .filter(|cookie| !cookie.is_expired(now))
        .map(|cookie| format!("{}={}", cookie.name, cookie.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Record every `Set-Cookie` response header into `store`.
fn record_cookies(store: &dyn CookieStore, headers: &[(String, String)]) {
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("set-cookie") {
            if let Some(cookie) = parse_set_cookie(value) {
                store.add_cookie(cookie);
            }
        }
    }
}

/// Minimal `Set-Cookie` parse: name/value plus the `Domain`, `Path`, and
/// `Max-Age` attributes. Real cookie semantics belong to real engines; this
/// is just enough for the worker-thread engine to round-trip a jar.
fn parse_set_cookie(raw: &str) -> Option<Cookie> {
    let mut parts = raw.split(';');
    let (name, value) = parts.next()?.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut cookie = Cookie::new(name, value.trim());
    for attribute in parts {
        let (key, value) = match attribute.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => continue,
        };
        if key.eq_ignore_ascii_case("domain") {
            cookie.domain = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("path") {
            cookie.path = Some(value.to_string());
        } else if key.eq_ignore_ascii_case("max-age") {
            if let Ok(seconds) = value.parse::<u64>() {
                cookie.expires = Some(SystemTime::now() + Duration::from_secs(seconds));
            }
        }
    }
    Some(cookie)
}

/// Causes handed to `on_failure` by this transport.
#[derive(Debug)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The request could not be executed at all.
    Transport(ureq::Error),
    /// The response body could not be read.
    Io(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status(status) => write!(f, "server returned HTTP {status}"),
            FetchError::Transport(err) => write!(f, "request could not be executed: {err}"),
            FetchError::Io(err) => write!(f, "failed reading response body: {err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Status(_) => None,
            FetchError::Transport(err) => Some(err),
            FetchError::Io(err) => Some(err),
        }
    }
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCookieStore;

    #[test]
    fn parses_bare_name_value() {
        let cookie = parse_set_cookie("session=abc123").unwrap();
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.value, "abc123");
        assert!(cookie.domain.is_none());
        assert!(cookie.expires.is_none());
    }

    #[test]
    fn parses_attributes() {
        let cookie =
            parse_set_cookie("id=7; Domain=api.test.com; Path=/v1; Max-Age=60; HttpOnly").unwrap();
        assert_eq!(cookie.domain.as_deref(), Some("api.test.com"));
        assert_eq!(cookie.path.as_deref(), Some("/v1"));
        let expires = cookie.expires.unwrap();
        assert!(!cookie.is_expired(SystemTime::now()));
        assert!(expires <= SystemTime::now() + Duration::from_secs(60));
    }

    #[test]
    fn rejects_malformed_header() {
        assert!(parse_set_cookie("no-equals-sign").is_none());
        assert!(parse_set_cookie("=value-without-name").is_none());
    }

    #[test]
    fn cookie_header_skips_expired() {
        let store = MemoryCookieStore::new();
        store.add_cookie(Cookie::new("live", "1"));
        let mut stale = Cookie::new("stale", "2");
        stale.expires = Some(SystemTime::now() - Duration::from_secs(1));
        store.add_cookie(stale);
        store.add_cookie(Cookie::new("other", "3"));

        assert_eq!(cookie_header(&store), "live=1; other=3");
    }

    #[test]
    fn record_cookies_only_reads_set_cookie_headers() {
        let store = MemoryCookieStore::new();
        let headers = vec![
            ("content-type".to_string(), "text/plain".to_string()),
            ("set-cookie".to_string(), "a=1".to_string()),
            ("Set-Cookie".to_string(), "b=2; Path=/".to_string()),
        ];
        record_cookies(&store, &headers);

        let names: Vec<_> = store.cookies().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
