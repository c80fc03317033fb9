//! Port Interfaces
//!
//! Contracts the decode session depends on, following the Hexagonal
//! Architecture pattern.
//!
//! ## Driven Ports (Outbound)
//!
//! - `FeedConnection`: a transport that yields raw frames and accepts
//!   subscription directives. Connecting, authenticating, heartbeats and
//!   reconnection all live behind this trait.
//! - `EventSink`: where decoded events and decode failures are delivered.

use async_trait::async_trait;

use crate::domain::errors::{DecodeError, FrameFormatError};
use crate::domain::events::Event;
use crate::domain::frame::Frame;
use crate::domain::subscription::SubscriptionDirective;

// =============================================================================
// Feed Connection
// =============================================================================

/// Errors reported by a transport adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// The remote end closed the connection.
    #[error("connection closed: {0}")]
    Closed(String),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A transport connection to one feed cluster.
///
/// Frames must be yielded in the order received.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedConnection: Send {
    /// Next frame, or `None` once the connection has ended cleanly.
    async fn next_frame(&mut self) -> Option<Result<Frame, ConnectionError>>;

    /// Send a subscription directive upstream.
    async fn send_directive(
        &mut self,
        directive: &SubscriptionDirective,
    ) -> Result<(), ConnectionError>;
}

// =============================================================================
// Event Sink
// =============================================================================

/// One item delivered to an [`EventSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A decoded record.
    Event(Event),
    /// A record that failed to decode.
    RecordError(DecodeError),
    /// A frame that was rejected as a whole.
    FrameError(FrameFormatError),
}

impl FeedEvent {
    /// The decoded event, if this item is one.
    #[must_use]
    pub const fn as_event(&self) -> Option<&Event> {
        match self {
            Self::Event(event) => Some(event),
            Self::RecordError(_) | Self::FrameError(_) => None,
        }
    }

    /// Whether this item reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Event(_))
    }
}

/// The sink stopped accepting events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Receiver of decode results.
#[async_trait]
pub trait EventSink: Send {
    /// Deliver one item.
    async fn deliver(&mut self, event: FeedEvent) -> Result<(), SinkClosed>;
}

#[async_trait]
impl EventSink for Vec<FeedEvent> {
    async fn deliver(&mut self, event: FeedEvent) -> Result<(), SinkClosed> {
        self.push(event);
        Ok(())
    }
}

#[async_trait]
impl<S: EventSink + ?Sized> EventSink for &mut S {
    async fn deliver(&mut self, event: FeedEvent) -> Result<(), SinkClosed> {
        (**self).deliver(event).await
    }
}

#[async_trait]
impl EventSink for tokio::sync::mpsc::Sender<FeedEvent> {
    async fn deliver(&mut self, event: FeedEvent) -> Result<(), SinkClosed> {
        self.send(event).await.map_err(|_| SinkClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::RawMessage;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<FeedEvent> = Vec::new();
        tokio_test::block_on(async {
            sink.deliver(FeedEvent::Event(Event::Raw(RawMessage { data: vec![1] })))
                .await
                .unwrap();
            sink.deliver(FeedEvent::Event(Event::Raw(RawMessage { data: vec![2] })))
                .await
                .unwrap();
        });
        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink[1].as_event(),
            Some(&Event::Raw(RawMessage { data: vec![2] }))
        );
    }

    #[tokio::test]
    async fn channel_sink_reports_closed_receiver() {
        let (mut tx, rx) = tokio::sync::mpsc::channel::<FeedEvent>(1);
        drop(rx);
        let result = tx
            .deliver(FeedEvent::Event(Event::Raw(RawMessage { data: vec![] })))
            .await;
        assert_eq!(result, Err(SinkClosed));
    }

    #[test]
    fn feed_event_error_flag() {
        let frame_error = FeedEvent::FrameError(FrameFormatError::new(Frame::from("{}"), "x"));
        assert!(frame_error.is_error());
        assert!(frame_error.as_event().is_none());
    }
}
