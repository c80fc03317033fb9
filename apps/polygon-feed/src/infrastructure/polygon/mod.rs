//! Polygon Feed Adapters
//!
//! Decoding for Polygon's real-time clusters:
//!
//! - **frame**: splits a transport frame into records
//! - **schema**: per-kind field tables and the `(asset class, tag)` tables
//! - **codec**: classifies and decodes records, encodes events back
//! - **session**: drives a transport connection through the codec

pub mod codec;
pub mod fields;
pub mod frame;
pub mod schema;
pub mod session;

pub use codec::{
    EncodeError, FrameResult, PolygonCodec, RecordResult, TAG_FIELD, decode_record, encode_record,
};
pub use fields::RecordReader;
pub use frame::{SplitFrame, split_frame};
pub use schema::{TagEntry, WireRecord, lookup, tag_table};
pub use session::{FeedSession, SessionError, SessionStats};
