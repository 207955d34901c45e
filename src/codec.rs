//! JSON method codec and the binary channel endpoint
//!
//! Messages on the link channel use the JSON method-codec layout that
//! embedding runtimes speak:
//!
//! - method call: `{"method": "<name>", "args": <json>}`
//! - success envelope: `[<result>]`
//! - error envelope: `["<code>", "<message>", <details>]`
//! - not implemented: an empty message

use crate::bridge::LinkBridge;
use crate::channel::{MethodCallHandler, PushSender};
use crate::error::{LinkError, Result};
use crate::types::{MethodCall, MethodResponse, PushEvent};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;

/// Error code returned for messages that are not a valid method call
pub const INVALID_CALL: &str = "invalid_call";

/// Encoder/decoder for method calls and reply envelopes
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl JsonMethodCodec {
    pub fn encode_call(&self, call: &MethodCall) -> Bytes {
        let message = serde_json::json!({
            "method": call.method,
            "args": call.args,
        });
        Bytes::from(message.to_string())
    }

    pub fn decode_call(&self, message: &[u8]) -> Result<MethodCall> {
        let value: Value = serde_json::from_slice(message)
            .map_err(|e| LinkError::Decode(format!("invalid JSON: {}", e)))?;

        let method = value
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| LinkError::Decode("missing string field 'method'".to_string()))?;
        let args = value.get("args").cloned().unwrap_or(Value::Null);

        Ok(MethodCall::with_args(method, args))
    }

    pub fn encode_response(&self, response: &MethodResponse) -> Bytes {
        match response {
            MethodResponse::Success(result) => {
                Bytes::from(Value::Array(vec![result.clone()]).to_string())
            }
            MethodResponse::Error {
                code,
                message,
                details,
            } => {
                let envelope = serde_json::json!([code, message, details]);
                Bytes::from(envelope.to_string())
            }
            MethodResponse::NotImplemented => Bytes::new(),
        }
    }

    pub fn decode_response(&self, message: &[u8]) -> Result<MethodResponse> {
        if message.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }

        let value: Value = serde_json::from_slice(message)
            .map_err(|e| LinkError::Decode(format!("invalid JSON: {}", e)))?;
        let mut envelope = match value {
            Value::Array(items) => items,
            other => {
                return Err(LinkError::Decode(format!(
                    "expected envelope array, got {}",
                    other
                )))
            }
        };

        match envelope.len() {
            1 => Ok(MethodResponse::Success(envelope.remove(0))),
            3 => {
                let details = envelope.remove(2);
                let message = envelope.remove(1).as_str().map(str::to_string);
                let code = envelope
                    .remove(0)
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| LinkError::Decode("error code must be a string".to_string()))?;
                Ok(MethodResponse::Error {
                    code,
                    message,
                    details,
                })
            }
            n => Err(LinkError::Decode(format!(
                "envelope must have 1 or 3 elements, got {}",
                n
            ))),
        }
    }
}

/// Raw message transport of the host runtime
pub trait BinaryMessenger: Send + Sync {
    /// Send an encoded message on a named channel; must not block
    fn send(&self, channel: &str, message: Bytes) -> Result<()>;
}

/// Push sender that encodes pushes and writes them to a `BinaryMessenger`
pub struct MessengerPushSender {
    channel: String,
    codec: JsonMethodCodec,
    messenger: Arc<dyn BinaryMessenger>,
}

impl MessengerPushSender {
    pub fn new(channel: impl Into<String>, messenger: Arc<dyn BinaryMessenger>) -> Self {
        Self {
            channel: channel.into(),
            codec: JsonMethodCodec,
            messenger,
        }
    }
}

impl PushSender for MessengerPushSender {
    fn push(&self, event: PushEvent) -> Result<()> {
        let message = self.codec.encode_call(&event.to_call());
        self.messenger.send(&self.channel, message)
    }

    fn name(&self) -> &str {
        &self.channel
    }
}

/// The named link channel, bound to a bridge
///
/// Decodes inbound messages, dispatches them to the bridge, and encodes the
/// replies. Never fails: undecodable messages get an `invalid_call` error
/// envelope.
#[derive(Debug, Clone)]
pub struct LinkChannel {
    name: String,
    codec: JsonMethodCodec,
    bridge: Arc<LinkBridge>,
}

impl LinkChannel {
    /// Channel named after the bridge's configured channel
    pub fn new(bridge: Arc<LinkBridge>) -> Self {
        Self {
            name: bridge.config().channel_name.clone(),
            codec: JsonMethodCodec,
            bridge,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec(&self) -> &JsonMethodCodec {
        &self.codec
    }

    /// Wire the runtime's messenger in as the bridge's push target
    pub fn register(&self, messenger: Arc<dyn BinaryMessenger>) {
        let sender = MessengerPushSender::new(self.name.clone(), messenger);
        self.bridge.register_handler(Arc::new(sender));
    }

    /// Answer one inbound message
    pub fn handle_message(&self, message: &[u8]) -> Bytes {
        let response = match self.codec.decode_call(message) {
            Ok(call) => self.bridge.handle(&call),
            Err(e) => {
                tracing::warn!(channel = %self.name, error = %e, "Rejected channel message");
                MethodResponse::error(INVALID_CALL, e.to_string())
            }
        };
        self.codec.encode_response(&response)
    }

    /// Encode a push as an outbound call message
    pub fn encode_push(&self, event: &PushEvent) -> Bytes {
        self.codec.encode_call(&event.to_call())
    }
}
