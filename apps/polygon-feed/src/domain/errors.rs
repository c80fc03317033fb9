//! Decode Errors
//!
//! Two failure classes exist. A [`FrameFormatError`] rejects a whole frame
//! and is reported once per frame. A [`DecodeError`] rejects one record and
//! sits beside the successfully decoded siblings of that frame.

use serde_json::Value;

use super::asset_class::AssetClass;
use super::frame::Frame;

/// The frame's top-level structure is not an array of records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("malformed frame ({reason}): {frame}")]
pub struct FrameFormatError {
    /// The frame as received.
    pub frame: Frame,
    /// What was wrong with it.
    pub reason: String,
}

impl FrameFormatError {
    /// Create a frame error.
    #[must_use]
    pub fn new(frame: Frame, reason: impl Into<String>) -> Self {
        Self {
            frame,
            reason: reason.into(),
        }
    }
}

/// A single record could not be decoded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The record's `ev` tag is missing or not valid for the asset class.
    #[error("unknown event type {tag:?} for {asset_class} feed")]
    UnknownEventType {
        /// Raw tag, `None` when the record carries no string tag.
        tag: Option<String>,
        /// Asset class the record was decoded under.
        asset_class: AssetClass,
        /// The record as received.
        record: Value,
    },

    /// A known field holds a value of the wrong type.
    #[error("field `{field}` of `{tag}` record: expected {expected}, got {value}")]
    FieldTypeMismatch {
        /// Tag of the record being decoded.
        tag: String,
        /// Wire name of the offending field.
        field: &'static str,
        /// Declared semantic type.
        expected: &'static str,
        /// The value as received.
        value: Value,
    },
}

impl DecodeError {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownEventType { .. } => "unknown_event_type",
            Self::FieldTypeMismatch { .. } => "field_type_mismatch",
        }
    }

    /// The record tag, when one was present.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::UnknownEventType { tag, .. } => tag.as_deref(),
            Self::FieldTypeMismatch { tag, .. } => Some(tag),
        }
    }
}
