//! Frame Splitter
//!
//! Turns one transport frame into the ordered records it carries. A JSON
//! frame is always an array, even for a single record. A raw-mode frame is
//! not inspected at all and comes back whole.

use serde_json::Value;

use crate::domain::errors::FrameFormatError;
use crate::domain::events::RawMessage;
use crate::domain::frame::{Frame, FrameMode};

/// Records carried by one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitFrame {
    /// Array elements in wire order.
    Records(Vec<Value>),
    /// Opaque payload from a raw-mode connection.
    Raw(RawMessage),
}

/// Split a frame according to the connection's frame mode.
///
/// # Errors
///
/// Returns `FrameFormatError` if a JSON-mode frame is not valid UTF-8, not
/// valid JSON, or not an array at the top level.
pub fn split_frame(frame: &Frame, mode: FrameMode) -> Result<SplitFrame, FrameFormatError> {
    match mode {
        FrameMode::Raw => Ok(SplitFrame::Raw(RawMessage {
            data: frame.as_bytes().to_vec(),
        })),
        FrameMode::Json => split_json(frame).map(SplitFrame::Records),
    }
}

fn split_json(frame: &Frame) -> Result<Vec<Value>, FrameFormatError> {
    let text = match frame {
        Frame::Text(text) => text.as_str(),
        Frame::Binary(data) => std::str::from_utf8(data)
            .map_err(|e| FrameFormatError::new(frame.clone(), format!("invalid UTF-8: {e}")))?,
    };

    let value: Value = serde_json::from_str(text)
        .map_err(|e| FrameFormatError::new(frame.clone(), format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(FrameFormatError::new(
            frame.clone(),
            format!("expected JSON array, got {}", json_type(&other)),
        )),
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_array_in_order() {
        let frame = Frame::from(r#"[{"ev":"T"},{"ev":"Q"},{"ev":"A"}]"#);
        let split = split_frame(&frame, FrameMode::Json).unwrap();
        assert_eq!(
            split,
            SplitFrame::Records(vec![json!({"ev":"T"}), json!({"ev":"Q"}), json!({"ev":"A"})])
        );
    }

    #[test]
    fn empty_array_has_no_records() {
        let split = split_frame(&Frame::from("[]"), FrameMode::Json).unwrap();
        assert_eq!(split, SplitFrame::Records(vec![]));
    }

    #[test]
    fn object_frame_is_rejected() {
        let frame = Frame::from(r#"{"not":"an array"}"#);
        let err = split_frame(&frame, FrameMode::Json).unwrap_err();
        assert_eq!(err.frame, frame);
        assert_eq!(err.reason, "expected JSON array, got object");
    }

    #[test]
    fn truncated_json_is_rejected() {
        let err = split_frame(&Frame::from(r#"[{"ev":"T""#), FrameMode::Json).unwrap_err();
        assert!(err.reason.starts_with("invalid JSON"));
    }

    #[test]
    fn binary_json_frame_is_split() {
        let frame = Frame::from(br#"[{"ev":"status"}]"#.to_vec());
        let split = split_frame(&frame, FrameMode::Json).unwrap();
        assert_eq!(split, SplitFrame::Records(vec![json!({"ev":"status"})]));
    }

    #[test]
    fn binary_non_utf8_frame_is_rejected_in_json_mode() {
        let err = split_frame(&Frame::from(vec![0xff, 0xfe]), FrameMode::Json).unwrap_err();
        assert!(err.reason.starts_with("invalid UTF-8"));
    }

    #[test]
    fn raw_mode_passes_frame_through() {
        let frame = Frame::from(vec![0x92, 0x01, 0x02]);
        let split = split_frame(&frame, FrameMode::Raw).unwrap();
        assert_eq!(
            split,
            SplitFrame::Raw(RawMessage {
                data: vec![0x92, 0x01, 0x02]
            })
        );
    }

    #[test]
    fn raw_mode_does_not_parse_text() {
        let split = split_frame(&Frame::from("not json"), FrameMode::Raw).unwrap();
        assert_eq!(
            split,
            SplitFrame::Raw(RawMessage {
                data: b"not json".to_vec()
            })
        );
    }
}
