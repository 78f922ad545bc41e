//! Uniform response envelope for tool results
//!
//! Every externally visible operation returns exactly one envelope: a JSON
//! object with a `status` field of `success`, `error`, or `info`. Success
//! envelopes carry the operation payload inline; error and info envelopes
//! carry a human-readable `message` only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Status tag carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The operation completed and the payload is usable
    Success,
    /// The operation was attempted and failed; see `message`
    Error,
    /// The capability is not enabled; no call was attempted
    Info,
}

impl Status {
    /// String form used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Error => "error",
            Status::Info => "info",
        }
    }
}

/// Build a success envelope from an object payload.
///
/// Non-object payloads are wrapped under a `data` key so the envelope is
/// always a flat object with a `status` field.
pub fn success(payload: Value) -> Value {
    match payload {
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len() + 1);
            out.insert("status".to_string(), json!(Status::Success));
            out.extend(fields);
            Value::Object(out)
        }
        other => json!({ "status": Status::Success, "data": other }),
    }
}

/// Build an error envelope carrying a human-readable message
pub fn error(message: impl Into<String>) -> Value {
    json!({ "status": Status::Error, "message": message.into() })
}

/// Build an info envelope for a capability that was never enabled
pub fn info(message: impl Into<String>) -> Value {
    json!({ "status": Status::Info, "message": message.into() })
}

/// Read the status tag of an envelope, if present and well-formed
pub fn status_of(envelope: &Value) -> Option<Status> {
    match envelope.get("status")?.as_str()? {
        "success" => Some(Status::Success),
        "error" => Some(Status::Error),
        "info" => Some(Status::Info),
        _ => None,
    }
}
