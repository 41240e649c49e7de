//! Request/callback adapter over an asynchronous HTTP transport.
//!
//! # Overview
//! The single point through which an application talks to its web backend:
//! resolve a full URL from a base URL and a resource-relative path,
//! dispatch GET/POST requests through an injected [`Transport`], and
//! deliver the transport's lifecycle events to a per-request [`Callback`]
//! wrapped in a logging adapter. Optionally manages a shared cookie jar
//! and a permissive TLS posture.
//!
//! # Design
//! - The transport is a capability, not an implementation detail: the HTTP
//!   engine (pooling, retries, TLS, timeouts) stays behind the [`Transport`]
//!   trait. [`ThreadTransport`] is the bundled worker-thread engine.
//! - Event forwarding is 1:1 and synchronous with the transport's delivery
//!   thread; the adapter only adds structured, per-instance-toggleable
//!   debug logging.
//! - Cookie persistence is the host's concern: [`CookieStore`] is consumed,
//!   and every cookie operation fails cleanly while no store is enabled.

pub mod adapter;
pub mod callback;
pub mod client;
pub mod error;
pub mod request;
pub mod store;
pub mod threaded;
pub mod transport;
pub mod url;

pub use adapter::LoggingCallback;
pub use callback::Callback;
pub use client::Client;
pub use error::{ClientError, TlsError};
pub use request::{Method, Request, SimpleRequest};
pub use store::{Cookie, CookieStore, MemoryCookieStore};
pub use threaded::{FetchError, ThreadTransport};
pub use transport::{TlsOptions, Transport};
