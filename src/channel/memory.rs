//! In-process push channel
//!
//! Backed by an unbounded `tokio::sync::mpsc` channel so `push` never
//! blocks the OS callback that produced the link. The runtime side awaits
//! pushes with `PushReceiver::recv` or consumes them as a `Stream`.

use crate::channel::PushSender;
use crate::error::{LinkError, Result};
use crate::types::PushEvent;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Create a connected sender/receiver pair
pub fn channel(name: impl Into<String>) -> (MemoryPushSender, PushReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sender = MemoryPushSender {
        name: name.into(),
        tx,
    };
    (sender, PushReceiver { rx })
}

/// Sending half registered with the bridge
#[derive(Debug, Clone)]
pub struct MemoryPushSender {
    name: String,
    tx: mpsc::UnboundedSender<PushEvent>,
}

impl MemoryPushSender {
    /// Whether the receiving half has been dropped
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PushSender for MemoryPushSender {
    fn push(&self, event: PushEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|_| LinkError::ChannelClosed(self.name.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Receiving half held by the embedded runtime
#[derive(Debug)]
pub struct PushReceiver {
    rx: mpsc::UnboundedReceiver<PushEvent>,
}

impl PushReceiver {
    /// Wait for the next push; `None` once every sender is gone
    pub async fn recv(&mut self) -> Option<PushEvent> {
        self.rx.recv().await
    }

    /// Take a push if one is already queued
    pub fn try_recv(&mut self) -> Option<PushEvent> {
        self.rx.try_recv().ok()
    }

    /// Drain everything currently queued
    pub fn drain(&mut self) -> Vec<PushEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Consume pushes as a `Stream`
    pub fn into_stream(self) -> UnboundedReceiverStream<PushEvent> {
        UnboundedReceiverStream::new(self.rx)
    }
}
