//! The client: base-URL resolution + callback adaptation + method dispatch
//! over an injected transport.
//!
//! # Design
//! - `Client` holds only the base URL, the transport, an optional cookie
//!   store reference, and the diagnostic flag; it keeps no per-request
//!   state, so concurrent `send` calls are independent.
//! - The cookie store has exactly two states: disabled (initial) and
//!   enabled, entered once via `set_persistent_cookie_store`. Every cookie
//!   operation before that transition fails with
//!   [`ClientError::CookieStoreDisabled`].
//! - TLS loosening is best effort: `accept_any_certificate` reports success
//!   as a boolean and logs the underlying cause on failure instead of
//!   propagating it.

use std::sync::Arc;
use std::time::SystemTime;

use crate::adapter::LoggingCallback;
use crate::callback::Callback;
use crate::error::ClientError;
use crate::request::{Method, Request};
use crate::store::{Cookie, CookieStore};
use crate::transport::{TlsOptions, Transport};
use crate::url;

/// Client of a web application: the single point through which application
/// code talks to the remote server.
///
/// Requests are executed by the injected [`Transport`] on its own worker
/// threads, so there is no need to wrap `send` in any threading construct;
/// outcomes arrive through the [`Callback`] passed per dispatch.
pub struct Client {
    base_url: String,
    transport: Arc<dyn Transport>,
    cookie_store: Option<Arc<dyn CookieStore>>,
    debug: bool,
}

impl Client {
    /// A client for the application rooted at `base_url`
    /// (`scheme://host[:port]`), dispatching through `transport`.
    ///
    /// Diagnostic logging starts enabled; see [`Client::set_debug`].
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            cookie_store: None,
            debug: true,
        }
    }

    /// Toggle per-event diagnostic logging for subsequent dispatches.
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Send `request`, delivering its lifecycle events to `callback`.
    ///
    /// Resolves the full URL from the base URL and the request path, wraps
    /// `callback` in the logging adapter, and dispatches on the request
    /// method: GET with parameters as query parameters, POST with
    /// parameters as the request body. Returns immediately; events arrive
    /// asynchronously on the transport's delivery thread.
    pub fn send(&self, request: &dyn Request, callback: impl Callback + Send + 'static) {
        let resolved = url::resolve(&self.base_url, request.path());
        let params = request.parameters();
        let handler = Box::new(LoggingCallback::new(
            Box::new(callback),
            resolved.clone(),
            self.debug,
        ));
        match request.method() {
            Method::Get => self.transport.get(&resolved, &params, handler),
            Method::Post => self.transport.post(&resolved, &params, handler),
        }
    }

    /// Reconfigure the transport to accept any certificate and any
    /// hostname. Returns `true` on success; on failure logs the cause and
    /// returns `false` rather than propagating.
    pub fn accept_any_certificate(&self) -> bool {
        match self.transport.configure_tls(TlsOptions::accept_any()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "accepting any certificate failed");
                false
            }
        }
    }

    /// Enable persistent cookie management, sharing `store` with the
    /// transport. One-way transition: cookie operations work from here on.
    pub fn set_persistent_cookie_store(&mut self, store: Arc<dyn CookieStore>) {
        self.transport.set_cookie_store(store.clone());
        self.cookie_store = Some(store);
        if self.debug {
            tracing::debug!("persistent cookie store enabled");
        }
    }

    /// Add `cookie` to the persistent store.
    pub fn add_persistent_cookie(&self, cookie: Cookie) -> Result<(), ClientError> {
        self.store_for("add a cookie")?.add_cookie(cookie);
        Ok(())
    }

    /// All cookies currently in the persistent store.
    pub fn persistent_cookies(&self) -> Result<Vec<Cookie>, ClientError> {
        Ok(self.store_for("extract cookies")?.cookies())
    }

    /// Drop every persistent cookie expired as of `cutoff`.
    pub fn clear_expired_cookies(&self, cutoff: SystemTime) -> Result<(), ClientError> {
        self.store_for("clear expired cookies")?.clear_expired(cutoff);
        Ok(())
    }

    /// Drop every persistent cookie.
    pub fn clear_persistent_cookies(&self) -> Result<(), ClientError> {
        self.store_for("clear cookies")?.clear();
        Ok(())
    }

    fn store_for(&self, operation: &'static str) -> Result<&dyn CookieStore, ClientError> {
        self.cookie_store
            .as_deref()
            .ok_or(ClientError::CookieStoreDisabled { operation })
    }
}
