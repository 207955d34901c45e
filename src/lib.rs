//! # a3s-link
//!
//! Launch-link capture and delivery between a mobile host shell and the
//! runtime embedded in it.
//!
//! ## Overview
//!
//! The OS can hand the app its launch URL before the embedded runtime has
//! registered a message handler. `a3s-link` holds that first link in a
//! single pending slot until the runtime asks for it, and forwards every
//! later link as a live `onNewIntent` push.
//!
//! ## Quick Start
//!
//! ```rust
//! use a3s_link::{BridgeConfig, LinkBridge, LinkCapture, LaunchEvent, MethodCall};
//! use a3s_link::channel::{memory, MethodCallHandler};
//! use std::sync::Arc;
//!
//! let bridge = Arc::new(LinkBridge::new(BridgeConfig::for_app("com.example.app")));
//! let capture = LinkCapture::new(Arc::clone(&bridge));
//!
//! // The OS launches the app with a URL before the runtime is up
//! capture.observe(LaunchEvent::ColdLaunch { url: Some("app://item/42".into()) });
//!
//! // The runtime registers, then pulls the initial link
//! let (sender, mut pushes) = memory::channel("com.example.app/links");
//! bridge.register_handler(Arc::new(sender));
//! let reply = bridge.handle(&MethodCall::new("getInitialLink"));
//! assert_eq!(reply.value(), Some(&serde_json::json!("app://item/42")));
//!
//! // Later links arrive as pushes
//! capture.observe(LaunchEvent::OpenUrl { url: Some("app://item/43".into()) });
//! assert_eq!(pushes.try_recv().unwrap().link.as_str(), "app://item/43");
//! ```
//!
//! ## Architecture
//!
//! - **LinkBridge** — the pending-slot state machine and request dispatch
//! - **LinkCapture** — adapts OS launch notifications (`capture::android`,
//!   `capture::ios`) into bridge observations
//! - **PushSender** / **MethodCallHandler** — channel seams to the runtime
//! - **LinkChannel** — JSON method-codec endpoint over a binary messenger

pub mod bridge;
pub mod capture;
pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod types;

// Re-export core types
pub use bridge::LinkBridge;
pub use capture::{LaunchEvent, LinkCapture, UserActivity};
pub use channel::{MethodCallHandler, PushSender};
pub use codec::{BinaryMessenger, JsonMethodCodec, LinkChannel, MessengerPushSender};
pub use config::BridgeConfig;
pub use error::{LinkError, Result};
pub use types::{
    BridgeStats, Link, LinkRequest, MethodCall, MethodResponse, PushEvent, CLEAR_INITIAL_LINK,
    GET_INITIAL_LINK, ON_NEW_INTENT,
};

// Re-export the in-process push channel for convenience
pub use channel::memory::{MemoryPushSender, PushReceiver};
