//! Feed Codec
//!
//! Decodes Polygon real-time frames into [`Event`]s for one connection.
//!
//! # Flow
//!
//! ```text
//! Frame ──► split_frame ──► [record, record, ...]
//!                                │
//!                                ▼
//!               "ev" tag ──► status table ──► asset class table ──► WireRecord::decode
//! ```
//!
//! A frame that is not an array fails as a whole. Every record of a valid
//! frame yields exactly one result, in wire order, so one bad record never
//! hides its siblings.
//!
//! The codec holds only its configuration and is safe to share across
//! threads; decoding performs no I/O.

use serde_json::Value;

use crate::domain::asset_class::AssetClass;
use crate::domain::errors::{DecodeError, FrameFormatError};
use crate::domain::events::Event;
use crate::domain::frame::{Frame, FrameMode};
use crate::domain::subscription::SubscriptionDirective;

use super::fields::RecordReader;
use super::frame::{SplitFrame, split_frame};
use super::schema::lookup;

/// Field carrying the record tag.
pub const TAG_FIELD: &str = "ev";

/// Outcome of decoding one record.
pub type RecordResult = Result<Event, DecodeError>;

/// Outcome of decoding one frame.
pub type FrameResult = Result<Vec<RecordResult>, FrameFormatError>;

/// Encoding errors.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// Raw passthrough events have no wire record.
    #[error("raw events cannot be encoded as wire records")]
    RawEvent,

    /// JSON serialization failed.
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoder for one connection's frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonCodec {
    asset_class: AssetClass,
    mode: FrameMode,
}

impl PolygonCodec {
    /// Create a codec for an asset class and frame mode.
    #[must_use]
    pub const fn new(asset_class: AssetClass, mode: FrameMode) -> Self {
        Self { asset_class, mode }
    }

    /// Create a JSON-mode codec.
    #[must_use]
    pub const fn json(asset_class: AssetClass) -> Self {
        Self::new(asset_class, FrameMode::Json)
    }

    /// Asset class records are decoded under.
    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        self.asset_class
    }

    /// Frame mode of the connection.
    #[must_use]
    pub const fn mode(&self) -> FrameMode {
        self.mode
    }

    /// Decode a frame into one result per record.
    ///
    /// # Errors
    ///
    /// Returns `FrameFormatError` if the frame is not an array of records.
    /// Per-record failures are returned inside the `Ok` vector.
    pub fn decode(&self, frame: &Frame) -> FrameResult {
        match split_frame(frame, self.mode)? {
            SplitFrame::Raw(raw) => Ok(vec![Ok(Event::Raw(raw))]),
            SplitFrame::Records(records) => Ok(records
                .iter()
                .map(|record| decode_record(self.asset_class, record))
                .collect()),
        }
    }

    /// Decode a text frame.
    ///
    /// # Errors
    ///
    /// Returns `FrameFormatError` if the frame is not an array of records.
    pub fn decode_text(&self, text: &str) -> FrameResult {
        self.decode(&Frame::from(text))
    }

    /// Decode a single record under this codec's asset class.
    ///
    /// # Errors
    ///
    /// Returns `UnknownEventType` or `FieldTypeMismatch`.
    pub fn decode_record(&self, record: &Value) -> RecordResult {
        decode_record(self.asset_class, record)
    }

    /// Encode events back into a JSON frame.
    ///
    /// # Errors
    ///
    /// Returns an error if any event is a raw passthrough.
    pub fn encode_frame(&self, events: &[Event]) -> Result<String, EncodeError> {
        let records = events
            .iter()
            .map(encode_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(serde_json::to_string(&records)?)
    }

    /// Encode a subscription directive for the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn encode_directive(directive: &SubscriptionDirective) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(directive)?)
    }
}

/// Decode one record under an asset class.
///
/// # Errors
///
/// Returns `UnknownEventType` if the record is not an object, has no string
/// `ev` tag, or its tag is not valid for the asset class. Returns
/// `FieldTypeMismatch` for the first field of the wrong type.
pub fn decode_record(asset_class: AssetClass, record: &Value) -> RecordResult {
    let unknown = |tag: Option<&str>| DecodeError::UnknownEventType {
        tag: tag.map(str::to_string),
        asset_class,
        record: record.clone(),
    };

    let Some(fields) = record.as_object() else {
        return Err(unknown(None));
    };
    let Some(tag) = fields.get(TAG_FIELD).and_then(Value::as_str) else {
        return Err(unknown(None));
    };
    let entry = lookup(asset_class, tag).ok_or_else(|| unknown(Some(tag)))?;

    entry.decode(&RecordReader::new(tag, fields))
}

/// Encode one event as its wire record.
///
/// Absent fields are omitted, so decoding the result yields the same event.
///
/// # Errors
///
/// Returns an error for raw passthrough events.
pub fn encode_record(event: &Event) -> Result<Value, EncodeError> {
    if matches!(event, Event::Raw(_)) {
        return Err(EncodeError::RawEvent);
    }
    Ok(serde_json::to_value(event)?)
}
