//! Bridge configuration
//!
//! Names the method channel shared with the embedded runtime and the push
//! method used for live links. Loadable from camelCase JSON.

use crate::error::{LinkError, Result};
use crate::types::ON_NEW_INTENT;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a `LinkBridge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Method channel name, scoped per application (e.g., "com.example.app/links")
    #[serde(default = "default_channel_name")]
    pub channel_name: String,

    /// Method name for outbound live-link pushes
    #[serde(default = "default_push_method")]
    pub push_method: String,
}

fn default_channel_name() -> String {
    "app/links".to_string()
}

fn default_push_method() -> String {
    ON_NEW_INTENT.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: default_channel_name(),
            push_method: default_push_method(),
        }
    }
}

impl BridgeConfig {
    /// Config whose channel is scoped to the given application id
    pub fn for_app(app_id: &str) -> Self {
        Self {
            channel_name: format!("{}/links", app_id),
            ..Self::default()
        }
    }

    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    pub fn with_push_method(mut self, method: impl Into<String>) -> Self {
        self.push_method = method.into();
        self
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LinkError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            channel = %config.channel_name,
            "Bridge config loaded"
        );
        Ok(config)
    }

    /// Reject channel and method names the runtime could never address
    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            return Err(LinkError::Config("Channel name cannot be empty".to_string()));
        }
        if self.channel_name.chars().any(char::is_whitespace) {
            return Err(LinkError::Config(format!(
                "Channel name '{}' must not contain whitespace",
                self.channel_name
            )));
        }
        if self.push_method.is_empty() {
            return Err(LinkError::Config("Push method cannot be empty".to_string()));
        }
        Ok(())
    }
}
