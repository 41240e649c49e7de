//! Error types for the web-application client.
//!
//! # Design
//! Only invalid-state conditions are errors of this layer. TLS
//! reconfiguration problems are converted to a boolean result by
//! `Client::accept_any_certificate`, and transport-reported failures
//! (HTTP errors, timeouts, cancellation) arrive as callback events, not
//! as `Err` values.

use std::fmt;

/// Errors raised synchronously by [`crate::Client`] methods.
#[derive(Debug)]
pub enum ClientError {
    /// A cookie operation was invoked before a persistent cookie store was
    /// enabled with `set_persistent_cookie_store`.
    CookieStoreDisabled {
        /// The operation that was attempted, e.g. `"add cookie"`.
        operation: &'static str,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::CookieStoreDisabled { operation } => write!(
                f,
                "cannot {operation} without a persistent cookie store; \
                 call set_persistent_cookie_store first"
            ),
        }
    }
}

impl std::error::Error for ClientError {}

/// Failure reported by a transport's TLS reconfiguration.
///
/// Transports map whatever their engine raises (key store errors, backend
/// initialization failures) into this type so the client can log the cause
/// and collapse the outcome to a boolean.
#[derive(Debug)]
pub struct TlsError {
    message: String,
}

impl TlsError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TLS configuration failed: {}", self.message)
    }
}

impl std::error::Error for TlsError {}
