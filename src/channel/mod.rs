//! Channel seams between the bridge and the embedded runtime
//!
//! The runtime talks to the bridge in two directions:
//! - inbound requests, answered by a `MethodCallHandler`
//! - outbound pushes, delivered through a `PushSender` the runtime registers
//!
//! Both are synchronous and non-blocking. Any transport that can honor that
//! (an in-process queue, a platform binary messenger, a test recorder)
//! implements `PushSender`.

use crate::error::Result;
use crate::types::{MethodCall, MethodResponse, PushEvent};

pub mod memory;

/// Outbound push channel to the embedded runtime
///
/// `push` must not block. Delivery after a successful `push` is the
/// runtime's responsibility; no reply is awaited.
pub trait PushSender: Send + Sync {
    /// Hand a push to the runtime
    fn push(&self, event: PushEvent) -> Result<()>;

    /// Sender name used in log fields
    fn name(&self) -> &str {
        "push"
    }
}

impl<F> PushSender for F
where
    F: Fn(PushEvent) -> Result<()> + Send + Sync,
{
    fn push(&self, event: PushEvent) -> Result<()> {
        self(event)
    }
}

/// Inbound request handler
///
/// Unknown methods are answered with `MethodResponse::NotImplemented`,
/// never with a panic.
pub trait MethodCallHandler: Send + Sync {
    fn handle(&self, call: &MethodCall) -> MethodResponse;
}
