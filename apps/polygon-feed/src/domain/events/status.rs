//! Status Messages
//!
//! Control messages shared by every cluster: connection and auth results,
//! subscription acknowledgements, and error notices.
//!
//! # Wire Format (JSON)
//! ```json
//! {"ev": "status", "status": "auth_success", "message": "authenticated"}
//! ```

use serde::Serialize;

/// Control message from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    /// Wire tag (always "status")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Status code, e.g. "connected", "auth_success", "success", "error"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Human readable detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusMessage {
    /// Whether the feed accepted the connection's credentials.
    #[must_use]
    pub fn is_auth_success(&self) -> bool {
        self.status.as_deref() == Some("auth_success")
    }

    /// Whether the feed rejected the connection's credentials.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        self.status.as_deref() == Some("auth_failed")
    }

    /// Whether this is an error notice.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: &str) -> StatusMessage {
        StatusMessage {
            event_type: "status".to_string(),
            status: Some(code.to_string()),
            message: None,
        }
    }

    #[test]
    fn status_helpers() {
        assert!(status("auth_success").is_auth_success());
        assert!(!status("auth_success").is_auth_failure());
        assert!(status("auth_failed").is_auth_failure());
        assert!(status("error").is_error());
        assert!(!StatusMessage::default().is_error());
    }
}
