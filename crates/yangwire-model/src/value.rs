//! Typed leaf payloads and their textual codec.
//!
//! Leaf values travel as XML text content. The textual encoding follows
//! the conventions the rest of the workspace uses on the wire:
//! lowercase booleans, base64 binary, ISO 8601 timestamps with
//! milliseconds and a `Z` suffix. `Empty` leaves render no content at
//! all; their presence is the value.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::schema::LeafType;

/// A typed scalar carried by a leaf or leaf-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScalarValue {
    /// String value.
    Str(String),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    Uint(u64),
    /// Boolean value.
    Bool(bool),
    /// Opaque binary value (base64 on the wire).
    Binary(Bytes),
    /// Timestamp value (ISO 8601 on the wire).
    Timestamp(DateTime<Utc>),
    /// Presence-only value with no content.
    Empty,
}

impl ScalarValue {
    /// Render this value as XML text content.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Uint(u) => u.to_string(),
            Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Self::Binary(b) => BASE64.encode(b),
            Self::Timestamp(t) => t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            Self::Empty => String::new(),
        }
    }

    /// Parse XML text content as a value of the given leaf type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Scalar`] if the text does not parse as the
    /// declared type.
    pub fn parse_text(leaf_type: LeafType, text: &str) -> Result<Self, ModelError> {
        match leaf_type {
            LeafType::String => Ok(Self::Str(text.to_string())),
            LeafType::Int => text
                .parse::<i64>()
                .map(Self::Int)
                .map_err(|_| scalar_error("int", text)),
            LeafType::Uint => text
                .parse::<u64>()
                .map(Self::Uint)
                .map_err(|_| scalar_error("uint", text)),
            LeafType::Bool => match text {
                "true" => Ok(Self::Bool(true)),
                "false" => Ok(Self::Bool(false)),
                _ => Err(scalar_error("boolean", text)),
            },
            LeafType::Binary => BASE64
                .decode(text)
                .map(|b| Self::Binary(Bytes::from(b)))
                .map_err(|_| scalar_error("binary", text)),
            LeafType::Timestamp => parse_timestamp(text)
                .map(Self::Timestamp)
                .ok_or_else(|| scalar_error("timestamp", text)),
            LeafType::Empty => {
                if text.is_empty() {
                    Ok(Self::Empty)
                } else {
                    Err(scalar_error("empty", text))
                }
            }
        }
    }
}

fn scalar_error(kind: &'static str, text: &str) -> ModelError {
    ModelError::Scalar {
        kind,
        text: text.to_string(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .map(|ndt| ndt.and_utc())
                .ok()
        })
}
