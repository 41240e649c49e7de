//! The event interface through which application code observes a request.

use std::error::Error;

/// Lifecycle events of a single dispatched request.
///
/// Every handler has a default no-op implementation; override only the
/// events you care about. Events are delivered on the transport's own
/// delivery thread, so implementations must be `Send`.
///
/// For one request the transport guarantees: `on_start` first, then any
/// number of `on_progress`/`on_retry`, then exactly one of
/// `on_success`/`on_failure`/`on_cancel`, then `on_finish` last. Payload
/// references are valid only for the duration of the call.
#[allow(unused_variables)]
pub trait Callback {
    /// The request has been handed to the transport.
    fn on_start(&mut self) {}

    /// Response bytes received so far out of `total` (0 when unknown).
    fn on_progress(&mut self, received: u64, total: u64) {}

    /// The transport is retrying the request; `attempt` counts from 1.
    fn on_retry(&mut self, attempt: u32) {}

    /// The request completed with a 2xx status.
    fn on_success(&mut self, status: u16, headers: &[(String, String)], body: &[u8]) {}

    /// The request failed: non-2xx status, or a transport-level error, in
    /// which case `status` is 0 and no HTTP exchange took place. `cause`
    /// is the transport's own error value.
    fn on_failure(
        &mut self,
        status: u16,
        headers: &[(String, String)],
        body: &[u8],
        cause: &(dyn Error + Send + Sync),
    ) {
    }

    /// The request was canceled before completion.
    fn on_cancel(&mut self) {}

    /// Always the last event, after exactly one of
    /// `on_success`/`on_failure`/`on_cancel`.
    fn on_finish(&mut self) {}
}
