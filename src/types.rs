//! Core types for the a3s-link bridge
//!
//! All serialized types use camelCase JSON for wire compatibility with the
//! embedded runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbound request: return the pending launch link without clearing it
pub const GET_INITIAL_LINK: &str = "getInitialLink";

/// Inbound request: clear the pending launch link
pub const CLEAR_INITIAL_LINK: &str = "clearInitialLink";

/// Outbound push carrying a link that arrived after the launch link
pub const ON_NEW_INTENT: &str = "onNewIntent";

/// An opaque URI delivered by the OS to the application process
///
/// The bridge never interprets the contents. An empty string is a valid
/// link and is distinct from "no link".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Link(String);

impl Link {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Link {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Link {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for Link {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named call travelling over the method channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodCall {
    /// Method name (e.g., "getInitialLink")
    pub method: String,

    /// Call arguments, `null` when the method takes none
    #[serde(default)]
    pub args: serde_json::Value,
}

impl MethodCall {
    /// Create a call with no arguments
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            args: serde_json::Value::Null,
        }
    }

    /// Create a call carrying arguments
    pub fn with_args(method: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }
}

/// Inbound requests the bridge understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRequest {
    GetInitialLink,
    ClearInitialLink,
    /// Any other method name; answered with "not implemented"
    Unknown(String),
}

impl LinkRequest {
    /// Map a method name onto a request
    pub fn from_method(method: &str) -> Self {
        match method {
            GET_INITIAL_LINK => Self::GetInitialLink,
            CLEAR_INITIAL_LINK => Self::ClearInitialLink,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The wire method name
    pub fn method(&self) -> &str {
        match self {
            Self::GetInitialLink => GET_INITIAL_LINK,
            Self::ClearInitialLink => CLEAR_INITIAL_LINK,
            Self::Unknown(name) => name,
        }
    }
}

impl From<&MethodCall> for LinkRequest {
    fn from(call: &MethodCall) -> Self {
        Self::from_method(&call.method)
    }
}

/// Reply to an inbound method call
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    /// Handled; `Value::Null` means "no value"
    Success(serde_json::Value),

    /// The call could not be handled
    Error {
        code: String,
        message: Option<String>,
        details: serde_json::Value,
    },

    /// No handler for this method name
    NotImplemented,
}

impl MethodResponse {
    /// Success carrying "no value"
    pub fn null() -> Self {
        Self::Success(serde_json::Value::Null)
    }

    /// Success carrying an optional link (`None` becomes `null`)
    pub fn link(link: Option<Link>) -> Self {
        match link {
            Some(link) => Self::Success(serde_json::Value::String(link.into_string())),
            None => Self::null(),
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error {
            code: code.into(),
            message: Some(message.into()),
            details: serde_json::Value::Null,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented)
    }

    /// The success payload, if any
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Outbound push sent to the embedded runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEvent {
    /// Push method name (default "onNewIntent")
    pub method: String,

    /// The live link being forwarded
    pub link: Link,
}

impl PushEvent {
    pub fn new(method: impl Into<String>, link: Link) -> Self {
        Self {
            method: method.into(),
            link,
        }
    }

    /// The push as a method call whose argument is the link string
    pub fn to_call(&self) -> MethodCall {
        MethodCall::with_args(
            self.method.clone(),
            serde_json::Value::String(self.link.as_str().to_string()),
        )
    }
}

/// Snapshot of bridge activity counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeStats {
    /// Total links observed by the bridge
    pub observed: u64,

    /// Links that landed in the pending slot
    pub captured: u64,

    /// Live links the push sender accepted
    pub pushed: u64,

    /// Live links the push sender rejected (e.g., receiver gone)
    pub failed: u64,

    /// Live links dropped because no handler was registered
    pub dropped: u64,

    /// Number of times the consumer cleared the slot
    pub cleared: u64,

    /// Whether a runtime handler is registered
    pub handler_registered: bool,

    /// Whether the pending slot currently holds a link
    pub has_pending: bool,
}
