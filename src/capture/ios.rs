//! iOS app delegate adapter
//!
//! Links reach the delegate three ways: the launch options of
//! `didFinishLaunchingWithOptions`, `open url` for custom schemes, and
//! `continue userActivity` for universal links.

use super::{LaunchEvent, LinkCapture, UserActivity};
use crate::bridge::LinkBridge;
use std::sync::Arc;

/// Routes app delegate callbacks into a `LinkCapture`
#[derive(Debug, Clone)]
pub struct IosLinkCapture {
    capture: LinkCapture,
}

impl IosLinkCapture {
    pub fn new(bridge: Arc<LinkBridge>) -> Self {
        Self {
            capture: LinkCapture::new(bridge),
        }
    }

    /// `didFinishLaunchingWithOptions`, with the launch URL option if set
    pub fn did_finish_launching(&self, launch_url: Option<&str>) -> bool {
        self.capture.observe(LaunchEvent::ColdLaunch {
            url: launch_url.map(str::to_string),
        })
    }

    /// `application(_:open:options:)`; the URL is always accepted
    pub fn open_url(&self, url: &str) -> bool {
        self.capture.observe(LaunchEvent::OpenUrl {
            url: Some(url.to_string()),
        });
        true
    }

    /// `application(_:continue:restorationHandler:)`
    ///
    /// Returns `false` for activities that are not web-browsing links.
    pub fn continue_user_activity(&self, activity: UserActivity) -> bool {
        self.capture.observe(LaunchEvent::ContinueActivity { activity })
    }

    pub fn capture(&self) -> &LinkCapture {
        &self.capture
    }
}
