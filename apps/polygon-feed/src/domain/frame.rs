//! Raw Transport Frames
//!
//! A frame is one message unit delivered by the streaming transport. Whether
//! a frame is decoded as JSON or passed through opaque is decided by the
//! connection's [`FrameMode`], never by sniffing the frame content.

use std::fmt;

/// One message unit as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text frame.
    Text(String),
    /// Binary frame.
    Binary(Vec<u8>),
}

impl Frame {
    /// Frame payload as bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(data) => data,
        }
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Frame {
    fn from(data: Vec<u8>) -> Self {
        Self::Binary(data)
    }
}

impl fmt::Display for Frame {
    /// Diagnostic rendering, truncated to keep log lines bounded.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 64;
        match self {
            Self::Text(text) => {
                let end = text
                    .char_indices()
                    .nth(PREVIEW)
                    .map_or(text.len(), |(idx, _)| idx);
                if end < text.len() {
                    write!(f, "{}...", &text[..end])
                } else {
                    f.write_str(text)
                }
            }
            Self::Binary(data) => write!(f, "<{} binary bytes>", data.len()),
        }
    }
}

/// How a connection's frames are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// Frames are JSON arrays of tagged records.
    #[default]
    Json,
    /// Frames are opaque and passed through as a single raw record.
    Raw,
}

impl FrameMode {
    /// Parse a frame mode name, case-insensitively.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }

    /// Mode name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_bytes() {
        let text = Frame::from("[]");
        assert_eq!(text.as_bytes(), b"[]");
        assert_eq!(text.len(), 2);

        let binary = Frame::from(vec![0x91, 0x00]);
        assert_eq!(binary.as_bytes(), &[0x91, 0x00]);
        assert!(!binary.is_empty());
    }

    #[test]
    fn display_truncates_long_text() {
        let frame = Frame::Text("x".repeat(200));
        let shown = frame.to_string();
        assert!(shown.ends_with("..."));
        assert_eq!(shown.len(), 67);
    }

    #[test]
    fn display_binary_shows_length() {
        assert_eq!(
            Frame::Binary(vec![1, 2, 3]).to_string(),
            "<3 binary bytes>"
        );
    }

    #[test]
    fn frame_mode_parsing() {
        assert_eq!(FrameMode::from_str_case_insensitive("JSON"), Some(FrameMode::Json));
        assert_eq!(FrameMode::from_str_case_insensitive("raw"), Some(FrameMode::Raw));
        assert_eq!(FrameMode::from_str_case_insensitive("msgpack"), None);
        assert_eq!(FrameMode::default(), FrameMode::Json);
    }
}
