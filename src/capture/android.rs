//! Android activity adapter
//!
//! An activity receives links through intents: the launching intent in
//! `onCreate`, and later ones in `onNewIntent` while the activity is alive.

use super::{LaunchEvent, LinkCapture};
use crate::bridge::LinkBridge;
use std::sync::Arc;

/// The parts of an Android intent the bridge reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intent {
    /// The intent's data URI, as a string
    pub data: Option<String>,
}

impl Intent {
    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }
}

/// Routes activity intent callbacks into a `LinkCapture`
#[derive(Debug, Clone)]
pub struct AndroidLinkCapture {
    capture: LinkCapture,
}

impl AndroidLinkCapture {
    pub fn new(bridge: Arc<LinkBridge>) -> Self {
        Self {
            capture: LinkCapture::new(bridge),
        }
    }

    /// `onCreate` with the launching intent
    pub fn on_create(&self, intent: Option<&Intent>) -> bool {
        self.capture.observe(LaunchEvent::ColdLaunch {
            url: intent.and_then(|i| i.data.clone()),
        })
    }

    /// `onNewIntent` while the activity is running
    pub fn on_new_intent(&self, intent: &Intent) -> bool {
        self.capture.observe(LaunchEvent::OpenUrl {
            url: intent.data.clone(),
        })
    }

    pub fn capture(&self) -> &LinkCapture {
        &self.capture
    }
}
