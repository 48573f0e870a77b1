//! # Versioned Envelope
//!
//! Both local storage and export files hold the same wrapper:
//!
//! ```json
//! { "version": 2, "owned": { "BP01-001": 3, "PR-107": 1 } }
//! ```
//!
//! Version 1 stored booleans, version 2 stores copy counts. Readers accept
//! either (and tolerate a missing or unknown tag, since [`crate::sanitize`]
//! handles both value shapes). Writers always emit [`SchemaVersion::LATEST`].

use crate::error::{NebulaError, Result};
use crate::ledger::Ledger;
use crate::sanitize::{parse_raw, sanitize, OwnershipMap};
use serde::Serialize;
use serde_json::Value;

/// Storage key the tracker state lives under.
pub const STORAGE_KEY: &str = "nebula-collection-tracker";
pub const EXPORT_FILE_NAME: &str = "nebula-collection.json";
pub const IMAGE_FILE_NAME: &str = "nebula-collection.png";

pub const INVALID_TRACKER_FILE: &str = "Invalid tracker file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    /// `owned` values are booleans.
    V1,
    /// `owned` values are copy counts.
    V2,
}

impl SchemaVersion {
    pub const LATEST: SchemaVersion = SchemaVersion::V2;

    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            1 => Some(SchemaVersion::V1),
            2 => Some(SchemaVersion::V2),
            _ => None,
        }
    }

    pub fn tag(self) -> u32 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    version: u32,
    owned: &'a OwnershipMap,
}

/// A decoded envelope whose `owned` payload has already been sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEnvelope {
    pub version: Option<SchemaVersion>,
    pub owned: OwnershipMap,
}

#[derive(Debug)]
pub enum EnvelopeError {
    NotJson(serde_json::Error),
    NotAnObject,
    MissingOwned,
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::NotJson(e) => write!(f, "not valid JSON ({e})"),
            EnvelopeError::NotAnObject => f.write_str("payload is not an object"),
            EnvelopeError::MissingOwned => f.write_str("payload has no \"owned\" field"),
        }
    }
}

pub fn encode(ledger: &Ledger) -> Result<String> {
    encode_mapping(&ledger.to_mapping())
}

/// Encodes an already-sanitized mapping without applying any caps.
pub fn encode_mapping(owned: &OwnershipMap) -> Result<String> {
    let envelope = EnvelopeOut {
        version: SchemaVersion::LATEST.tag(),
        owned,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

pub fn decode(text: &str) -> std::result::Result<DecodedEnvelope, EnvelopeError> {
    let value: Value = serde_json::from_str(text).map_err(EnvelopeError::NotJson)?;
    let Value::Object(map) = value else {
        return Err(EnvelopeError::NotAnObject);
    };
    let owned = map.get("owned").ok_or(EnvelopeError::MissingOwned)?;
    if is_falsy(owned) {
        return Err(EnvelopeError::MissingOwned);
    }
    let version = map
        .get("version")
        .and_then(Value::as_u64)
        .and_then(SchemaVersion::from_tag);
    if version.is_none() {
        tracing::debug!("envelope has no recognized version tag, sanitizing values as-is");
    }
    Ok(DecodedEnvelope {
        version,
        owned: sanitize(&parse_raw(owned)),
    })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Serializes the ledger as a downloadable tracker file.
pub fn export_json(ledger: &Ledger) -> Result<Vec<u8>> {
    export_mapping(&ledger.to_mapping())
}

pub fn export_mapping(owned: &OwnershipMap) -> Result<Vec<u8>> {
    Ok(encode_mapping(owned)?.into_bytes())
}

/// Parses and sanitizes an imported tracker file.
pub fn import_json(bytes: &[u8]) -> Result<DecodedEnvelope> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| NebulaError::Import(INVALID_TRACKER_FILE.to_string()))?;
    decode(text).map_err(|e| {
        tracing::debug!("rejected tracker file: {e}");
        NebulaError::Import(INVALID_TRACKER_FILE.to_string())
    })
}
