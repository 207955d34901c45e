//! Link capture — turns OS launch notifications into bridge observations
//!
//! Every way the host OS can hand the process a URL is expressed as a
//! `LaunchEvent`. `LinkCapture::observe` makes exactly one
//! `LinkBridge::observed_link` call per event that carries a URL, before
//! returning. No filtering or validation happens here.
//!
//! Platform adapters in `android` and `ios` translate their native callback
//! shapes into `LaunchEvent`s; they hold no state of their own.

use crate::bridge::LinkBridge;
use crate::types::Link;
use std::sync::Arc;

pub mod android;
pub mod ios;

/// Activity type for web-browsing continuations (universal links)
pub const ACTIVITY_TYPE_BROWSING_WEB: &str = "NSUserActivityTypeBrowsingWeb";

/// A resumed user activity offered to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    /// Activity type identifier
    pub activity_type: String,

    /// Web page URL, present for browsing activities
    pub webpage_url: Option<String>,
}

impl UserActivity {
    /// A web-browsing activity carrying a URL
    pub fn browsing_web(url: impl Into<String>) -> Self {
        Self {
            activity_type: ACTIVITY_TYPE_BROWSING_WEB.to_string(),
            webpage_url: Some(url.into()),
        }
    }

    /// The link this activity carries, if it is a browsing activity
    pub fn link(&self) -> Option<&str> {
        if self.activity_type == ACTIVITY_TYPE_BROWSING_WEB {
            self.webpage_url.as_deref()
        } else {
            None
        }
    }
}

/// A platform notification that may carry a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchEvent {
    /// Process started, possibly with a URL
    ColdLaunch { url: Option<String> },

    /// Running process asked to open a URL
    OpenUrl { url: Option<String> },

    /// Process resumed from a user activity
    ContinueActivity { activity: UserActivity },
}

impl LaunchEvent {
    /// The link carried by this event, if any
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::ColdLaunch { url } | Self::OpenUrl { url } => url.as_deref(),
            Self::ContinueActivity { activity } => activity.link(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::ColdLaunch { .. } => "cold_launch",
            Self::OpenUrl { .. } => "open_url",
            Self::ContinueActivity { .. } => "continue_activity",
        }
    }
}

/// Feeds OS-delivered links into a `LinkBridge`
#[derive(Debug, Clone)]
pub struct LinkCapture {
    bridge: Arc<LinkBridge>,
}

impl LinkCapture {
    pub fn new(bridge: Arc<LinkBridge>) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &Arc<LinkBridge> {
        &self.bridge
    }

    /// Report an event to the bridge
    ///
    /// Returns `true` when the event carried a link and it was observed.
    pub fn observe(&self, event: LaunchEvent) -> bool {
        match event.link() {
            Some(url) => {
                tracing::debug!(source = event.kind(), link = %url, "Link observed");
                self.bridge.observed_link(Link::new(url));
                true
            }
            None => {
                tracing::debug!(source = event.kind(), "Launch event carried no link");
                false
            }
        }
    }
}
