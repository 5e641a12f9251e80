use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use thiserror::Error;

use crate::model::peer::PeerId;

/// Signaling payload relayed between peers. The router stamps `from` with
/// the sender's id and passes `payload` through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<PeerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<PeerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<RawValue>>,
}

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("invalid message format")]
    Malformed(#[from] serde_json::Error),
    #[error("message type is required")]
    MissingType,
}

impl Envelope {
    pub fn decode(raw: &str) -> Result<Self, EnvelopeError> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        if envelope.kind.is_empty() {
            return Err(EnvelopeError::MissingType);
        }
        Ok(envelope)
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The addressed peer, if any. An absent or empty `to` means broadcast.
    pub fn target(&self) -> Option<&PeerId> {
        self.to.as_ref().filter(|to| !to.is_empty())
    }
}

/// Sent back to a client when the relay rejects one of its messages.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorNotice {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ErrorNotice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: "error".to_owned(),
            message: message.into(),
        }
    }
}
