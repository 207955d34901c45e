//! The link bridge state machine
//!
//! `LinkBridge` owns the single pending-link slot and the runtime's push
//! registration. The first link observed while the slot is empty becomes the
//! initial link, readable any number of times until the runtime clears it.
//! Every link observed while the slot is occupied is forwarded as a live
//! push, or dropped if no runtime handler has registered yet.

use crate::channel::{MethodCallHandler, PushSender};
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::types::{BridgeStats, Link, LinkRequest, MethodCall, MethodResponse, PushEvent};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct BridgeState {
    pending: Option<Link>,
    handler: Option<Arc<dyn PushSender>>,
    stats: BridgeStats,
}

/// Mediator between link capture and the embedded runtime
///
/// Construct once per process and share via `Arc`. All operations are
/// synchronous and constant-time; the slot and the registration are
/// serialized behind one lock.
pub struct LinkBridge {
    config: BridgeConfig,
    state: Mutex<BridgeState>,
}

impl LinkBridge {
    /// Create a bridge with an empty slot and no registered handler
    ///
    /// The config is taken as-is; use `try_new` for configs that were not
    /// loaded through `BridgeConfig::from_json` or `from_file`.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BridgeState::default()),
        }
    }

    /// Validate the config, then create the bridge
    pub fn try_new(config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    // The state is consistent between statements, so a panic in another
    // holder leaves nothing half-written.
    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a link handed to the process by the OS
    ///
    /// Fills the pending slot if it is empty; otherwise pushes the link to
    /// the registered handler, or drops it when there is none.
    pub fn observed_link(&self, link: impl Into<Link>) {
        let link = link.into();

        let sender = {
            let mut state = self.lock();
            state.stats.observed += 1;

            if state.pending.is_none() {
                tracing::debug!(link = %link, "Initial link captured");
                state.pending = Some(link);
                state.stats.captured += 1;
                return;
            }

            match state.handler.clone() {
                Some(sender) => sender,
                None => {
                    tracing::debug!(
                        link = %link,
                        "No runtime handler registered, dropping live link"
                    );
                    state.stats.dropped += 1;
                    return;
                }
            }
        };

        // Pushed outside the lock so a sender that calls back into the
        // bridge cannot deadlock.
        let event = PushEvent::new(self.config.push_method.clone(), link);
        tracing::debug!(
            link = %event.link,
            sender = sender.name(),
            "Pushing live link"
        );
        match sender.push(event) {
            Ok(()) => self.lock().stats.pushed += 1,
            Err(e) => {
                tracing::warn!(
                    channel = %self.config.channel_name,
                    sender = sender.name(),
                    error = %e,
                    "Failed to push live link"
                );
                self.lock().stats.failed += 1;
            }
        }
    }

    /// Register the runtime's push sender, replacing any earlier one
    ///
    /// Registration never delivers the pending link; the runtime pulls it
    /// with `getInitialLink`.
    pub fn register_handler(&self, sender: Arc<dyn PushSender>) {
        let mut state = self.lock();
        let replaced = state.handler.replace(sender).is_some();
        state.stats.handler_registered = true;

        tracing::info!(
            channel = %self.config.channel_name,
            replaced,
            "Runtime handler registered"
        );
    }

    pub fn has_handler(&self) -> bool {
        self.lock().handler.is_some()
    }

    /// The pending link, left in place
    pub fn initial_link(&self) -> Option<Link> {
        self.lock().pending.clone()
    }

    /// Empty the pending slot so the next observed link is captured again
    pub fn clear_initial_link(&self) {
        let mut state = self.lock();
        let had_link = state.pending.take().is_some();
        state.stats.cleared += 1;

        tracing::info!(
            channel = %self.config.channel_name,
            had_link,
            "Initial link cleared"
        );
    }

    /// Dispatch an inbound request
    pub fn dispatch(&self, request: &LinkRequest) -> MethodResponse {
        match request {
            LinkRequest::GetInitialLink => MethodResponse::link(self.initial_link()),
            LinkRequest::ClearInitialLink => {
                self.clear_initial_link();
                MethodResponse::null()
            }
            LinkRequest::Unknown(_) => {
                tracing::debug!(
                    channel = %self.config.channel_name,
                    method = request.method(),
                    "Method not implemented"
                );
                MethodResponse::NotImplemented
            }
        }
    }

    pub fn stats(&self) -> BridgeStats {
        let state = self.lock();
        BridgeStats {
            has_pending: state.pending.is_some(),
            ..state.stats.clone()
        }
    }
}

impl Default for LinkBridge {
    fn default() -> Self {
        Self::new(BridgeConfig::default())
    }
}

impl MethodCallHandler for LinkBridge {
    fn handle(&self, call: &MethodCall) -> MethodResponse {
        self.dispatch(&LinkRequest::from(call))
    }
}

impl std::fmt::Debug for LinkBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("LinkBridge")
            .field("channel", &self.config.channel_name)
            .field("pending", &state.pending)
            .field("handler_registered", &state.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::memory;
    use crate::error::LinkError;
    use crate::types::{CLEAR_INITIAL_LINK, GET_INITIAL_LINK};

    fn get(bridge: &LinkBridge) -> MethodResponse {
        bridge.handle(&MethodCall::new(GET_INITIAL_LINK))
    }

    fn clear(bridge: &LinkBridge) -> MethodResponse {
        bridge.handle(&MethodCall::new(CLEAR_INITIAL_LINK))
    }

    #[test]
    fn test_initial_state() {
        let bridge = LinkBridge::default();
        assert!(bridge.initial_link().is_none());
        assert!(!bridge.has_handler());
        assert_eq!(bridge.stats(), BridgeStats::default());
    }

    #[test]
    fn test_get_without_link_returns_null() {
        let bridge = LinkBridge::default();
        assert_eq!(get(&bridge), MethodResponse::Success(serde_json::Value::Null));
    }

    #[test]
    fn test_empty_string_link_is_a_value() {
        let bridge = LinkBridge::default();
        bridge.observed_link("");
        assert_eq!(get(&bridge), MethodResponse::Success(serde_json::json!("")));
    }

    #[test]
    fn test_repeated_reads_return_same_link() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://foo");

        for _ in 0..5 {
            assert_eq!(get(&bridge).value(), Some(&serde_json::json!("app://foo")));
        }
        assert_eq!(bridge.initial_link(), Some(Link::new("app://foo")));
    }

    #[test]
    fn test_clear_resets_capture() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://one");

        assert_eq!(clear(&bridge), MethodResponse::null());
        assert!(bridge.initial_link().is_none());

        bridge.observed_link("app://two");
        assert_eq!(get(&bridge).value(), Some(&serde_json::json!("app://two")));
    }

    #[test]
    fn test_clear_on_empty_slot_acks() {
        let bridge = LinkBridge::default();
        assert_eq!(clear(&bridge), MethodResponse::null());
        assert_eq!(bridge.stats().cleared, 1);
    }

    #[test]
    fn test_second_link_pushed_not_captured() {
        let bridge = LinkBridge::default();
        let (sender, mut receiver) = memory::channel("links");
        bridge.register_handler(Arc::new(sender));

        bridge.observed_link("app://first");
        bridge.observed_link("app://second");

        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));
        let pushes = receiver.drain();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].method, "onNewIntent");
        assert_eq!(pushes[0].link.as_str(), "app://second");
    }

    #[test]
    fn test_registration_does_not_deliver_pending() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://first");

        let (sender, mut receiver) = memory::channel("links");
        bridge.register_handler(Arc::new(sender));

        assert!(receiver.try_recv().is_none());
        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));
    }

    #[test]
    fn test_second_link_dropped_without_handler() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://first");
        bridge.observed_link("app://second");

        let (sender, mut receiver) = memory::channel("links");
        bridge.register_handler(Arc::new(sender));

        assert!(receiver.try_recv().is_none());
        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));

        let stats = bridge.stats();
        assert_eq!(stats.observed, 2);
        assert_eq!(stats.captured, 1);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.pushed, 0);
    }

    #[test]
    fn test_reregistration_replaces_sender() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://first");

        let (old_sender, mut old_receiver) = memory::channel("old");
        let (new_sender, mut new_receiver) = memory::channel("new");
        bridge.register_handler(Arc::new(old_sender));
        bridge.register_handler(Arc::new(new_sender));

        bridge.observed_link("app://second");

        assert!(old_receiver.try_recv().is_none());
        assert_eq!(new_receiver.try_recv().unwrap().link.as_str(), "app://second");
    }

    #[test]
    fn test_unknown_method_not_implemented() {
        let bridge = LinkBridge::default();
        bridge.observed_link("app://first");

        let response = bridge.handle(&MethodCall::new("getLatestLink"));
        assert!(response.is_not_implemented());
        // Unknown calls leave the slot alone
        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));
    }

    #[test]
    fn test_push_failure_is_swallowed() {
        let bridge = LinkBridge::default();
        bridge.register_handler(Arc::new(|_event: PushEvent| -> crate::Result<()> {
            Err(LinkError::ChannelClosed("gone".to_string()))
        }));

        bridge.observed_link("app://first");
        bridge.observed_link("app://second");

        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));
        let stats = bridge.stats();
        assert_eq!(stats.pushed, 0);
        assert_eq!(stats.failed, 1);
    }

    #[test]
    fn test_custom_push_method() {
        let bridge = LinkBridge::new(BridgeConfig::default().with_push_method("onLink"));
        let (sender, mut receiver) = memory::channel("links");
        bridge.register_handler(Arc::new(sender));

        bridge.observed_link("app://first");
        bridge.observed_link("app://second");

        assert_eq!(receiver.try_recv().unwrap().method, "onLink");
    }

    #[test]
    fn test_sender_may_reenter_bridge() {
        let bridge = Arc::new(LinkBridge::default());
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&bridge);
        let record = Arc::clone(&seen);
        bridge.register_handler(Arc::new(move |event: PushEvent| -> crate::Result<()> {
            let initial = inner.initial_link();
            record.lock().unwrap().push((event.link, initial));
            Ok(())
        }));

        bridge.observed_link("app://first");
        bridge.observed_link("app://second");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![(Link::new("app://second"), Some(Link::new("app://first")))]
        );
    }

    #[test]
    fn test_stats_track_lifecycle() {
        let bridge = LinkBridge::default();
        let (sender, _receiver) = memory::channel("links");

        bridge.observed_link("app://a");
        bridge.observed_link("app://b");
        bridge.register_handler(Arc::new(sender));
        bridge.observed_link("app://c");
        bridge.clear_initial_link();
        bridge.observed_link("app://d");

        let stats = bridge.stats();
        assert_eq!(stats.observed, 4);
        assert_eq!(stats.captured, 2);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.pushed, 1);
        assert_eq!(stats.cleared, 1);
        assert!(stats.handler_registered);
        assert!(stats.has_pending);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let bridge = Arc::new(LinkBridge::default());
        bridge.observed_link("app://first");

        let holder = Arc::clone(&bridge);
        let result = std::thread::spawn(move || {
            let _state = holder.state.lock().unwrap();
            panic!("panic while holding bridge state");
        })
        .join();
        assert!(result.is_err());
        assert!(bridge.state.is_poisoned());

        let (sender, mut receiver) = memory::channel("links");
        bridge.register_handler(Arc::new(sender));
        bridge.observed_link("app://second");

        assert!(bridge.has_handler());
        assert_eq!(bridge.initial_link(), Some(Link::new("app://first")));
        assert_eq!(get(&bridge).value(), Some(&serde_json::json!("app://first")));
        let pushes = receiver.drain();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].link.as_str(), "app://second");
        assert_eq!(bridge.stats().pushed, 1);
    }

    #[test]
    fn test_try_new_validates_config() {
        let err = LinkBridge::try_new(BridgeConfig::default().with_channel_name("")).unwrap_err();
        assert!(matches!(err, LinkError::Config(_)));

        let bridge = LinkBridge::try_new(BridgeConfig::for_app("com.example")).unwrap();
        assert_eq!(bridge.config().channel_name, "com.example/links");
    }
}
