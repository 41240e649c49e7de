//! The transport capability the client dispatches through.
//!
//! # Design
//! The actual HTTP engine (connection pooling, retries, TLS negotiation,
//! timeouts) stays behind this trait; the client only composes URL
//! resolution, callback adaptation, and a two-way method dispatch on top
//! of it. The trait is object-safe and used as `Arc<dyn Transport>` so the
//! engine is injected at construction rather than reached through statics.

use std::sync::Arc;

use crate::callback::Callback;
use crate::error::TlsError;
use crate::store::CookieStore;

/// Requested TLS verification posture for [`Transport::configure_tls`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TlsOptions {
    /// Accept server certificates that fail chain validation.
    pub accept_invalid_certs: bool,
    /// Accept certificates whose hostname does not match the request URL.
    pub accept_invalid_hostnames: bool,
}

impl TlsOptions {
    /// The permissive posture used by `Client::accept_any_certificate`:
    /// any certificate, any hostname.
    pub fn accept_any() -> Self {
        Self {
            accept_invalid_certs: true,
            accept_invalid_hostnames: true,
        }
    }
}

/// Asynchronous HTTP execution engine.
///
/// `get`/`post` return immediately; the engine executes the request on its
/// own worker thread(s) or event loop and drives `handler` from there,
/// honoring the event order documented on [`Callback`]. Requests dispatched
/// concurrently are independent; no ordering holds between their handlers.
pub trait Transport: Send + Sync {
    /// Execute a GET for `url`, encoding `params` as query parameters.
    fn get(&self, url: &str, params: &[(String, String)], handler: Box<dyn Callback + Send>);

    /// Execute a POST for `url`, sending `params` as a form-encoded body.
    fn post(&self, url: &str, params: &[(String, String)], handler: Box<dyn Callback + Send>);

    /// Reconfigure TLS verification for subsequent requests. Best effort:
    /// engines that cannot apply `options` report why via `TlsError`.
    fn configure_tls(&self, options: TlsOptions) -> Result<(), TlsError>;

    /// Attach a cookie store consulted and updated by subsequent requests.
    fn set_cookie_store(&self, store: Arc<dyn CookieStore>);
}
