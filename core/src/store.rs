//! Cookie jar capability consumed by the client and its transport.
//!
//! # Design
//! Persistence itself lives outside this crate: the host application brings
//! a `CookieStore` implementation backed by whatever storage it owns, which
//! is why `Cookie` derives serde traits. [`MemoryCookieStore`] is the
//! trivial in-process store used by tests and short-lived clients.

use std::sync::Mutex;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

/// A single HTTP cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Expiry instant; `None` means a session cookie that never expires
    /// from the store's point of view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<SystemTime>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: None,
            expires: None,
        }
    }

    /// Whether the cookie is expired as of `at`.
    pub fn is_expired(&self, at: SystemTime) -> bool {
        self.expires.is_some_and(|expires| expires <= at)
    }
}

/// Storage capability for cookies that should outlive a single request.
///
/// Used as `Arc<dyn CookieStore>` so one store can be shared between the
/// client (which exposes the management operations) and the transport
/// (which reads and records cookies while executing requests).
pub trait CookieStore: Send + Sync {
    /// Add `cookie`, replacing any stored cookie with the same identity
    /// (name, domain, path).
    fn add_cookie(&self, cookie: Cookie);

    /// Snapshot of all stored cookies, expired ones included.
    fn cookies(&self) -> Vec<Cookie>;

    /// Remove every cookie expired as of `cutoff`.
    fn clear_expired(&self, cutoff: SystemTime);

    /// Remove every cookie.
    fn clear(&self);
}

/// In-memory `CookieStore`. Not persistent.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: Mutex<Vec<Cookie>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieStore for MemoryCookieStore {
    fn add_cookie(&self, cookie: Cookie) {
        let mut cookies = self.cookies.lock().unwrap();
        match cookies
            .iter_mut()
            .find(|c| c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path)
        {
            Some(existing) => *existing = cookie,
            None => cookies.push(cookie),
        }
    }

    fn cookies(&self) -> Vec<Cookie> {
        self.cookies.lock().unwrap().clone()
    }

    fn clear_expired(&self, cutoff: SystemTime) {
        self.cookies
            .lock()
            .unwrap()
            .retain(|c| !c.is_expired(cutoff));
    }

    fn clear(&self) {
        self.cookies.lock().unwrap().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn add_replaces_same_identity() {
        let store = MemoryCookieStore::new();
        store.add_cookie(Cookie::new("session", "old"));
        store.add_cookie(Cookie::new("session", "new"));
        let cookies = store.cookies();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].value, "new");
    }

    #[test]
    fn same_name_different_domain_coexist() {
        let store = MemoryCookieStore::new();
        store.add_cookie(Cookie::new("id", "a"));
        let mut scoped = Cookie::new("id", "b");
        scoped.domain = Some("api.test.com".to_string());
        store.add_cookie(scoped);
        assert_eq!(store.cookies().len(), 2);
    }

    #[test]
    fn clear_expired_keeps_live_and_session_cookies() {
        let now = SystemTime::now();
        let store = MemoryCookieStore::new();

        let mut stale = Cookie::new("stale", "1");
        stale.expires = Some(now - Duration::from_secs(60));
        let mut live = Cookie::new("live", "1");
        live.expires = Some(now + Duration::from_secs(60));
        store.add_cookie(stale);
        store.add_cookie(live);
        store.add_cookie(Cookie::new("session", "1"));

        store.clear_expired(now);
        let names: Vec<_> = store.cookies().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["live", "session"]);
    }

    #[test]
    fn clear_removes_everything() {
        let store = MemoryCookieStore::new();
        store.add_cookie(Cookie::new("a", "1"));
        store.add_cookie(Cookie::new("b", "2"));
        store.clear();
        assert!(store.cookies().is_empty());
    }

    #[test]
    fn cookie_roundtrips_through_json() {
        let mut cookie = Cookie::new("session", "abc");
        cookie.path = Some("/".to_string());
        let json = serde_json::to_string(&cookie).unwrap();
        let back: Cookie = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cookie);
    }
}
