//! Feed Session
//!
//! Drives one transport connection through the codec: every frame is
//! decoded and its results are handed to the sink in wire order.
//!
//! The session does not retry. A transport error ends the session and is
//! returned to the caller, who owns the reconnection policy. Decode failures
//! never end the session; they are delivered to the sink like events.

use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ConnectionError, EventSink, FeedConnection, FeedEvent, SinkClosed,
};
use crate::domain::frame::Frame;
use crate::domain::subscription::SubscriptionDirective;
use crate::infrastructure::metrics;

use super::codec::PolygonCodec;

// =============================================================================
// Error Type
// =============================================================================

/// Errors that end a feed session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The transport failed.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// The sink stopped accepting events.
    #[error("sink closed")]
    SinkClosed(#[from] SinkClosed),
}

// =============================================================================
// Session Statistics
// =============================================================================

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames received.
    pub frames: u64,
    /// Records decoded into events.
    pub events: u64,
    /// Records that failed to decode.
    pub record_errors: u64,
    /// Frames rejected as a whole.
    pub frame_errors: u64,
}

// =============================================================================
// Feed Session
// =============================================================================

/// Decode loop for one connection.
pub struct FeedSession<C, S> {
    codec: PolygonCodec,
    connection: C,
    sink: S,
    cancel: CancellationToken,
    stats: SessionStats,
}

impl<C, S> FeedSession<C, S>
where
    C: FeedConnection,
    S: EventSink,
{
    /// Create a session.
    #[must_use]
    pub fn new(codec: PolygonCodec, connection: C, sink: S, cancel: CancellationToken) -> Self {
        Self {
            codec,
            connection,
            sink,
            cancel,
            stats: SessionStats::default(),
        }
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Forward a subscription directive to the connection.
    ///
    /// Empty directives are not sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport rejects the directive.
    pub async fn apply(&mut self, directive: &SubscriptionDirective) -> Result<(), SessionError> {
        if directive.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            asset_class = %self.codec.asset_class(),
            action = ?directive.action,
            params = %directive.params(),
            "Sending subscription directive"
        );
        self.connection.send_directive(directive).await?;
        Ok(())
    }

    /// Run until the connection ends, the token is cancelled, or an error
    /// occurs.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the sink closes.
    pub async fn run(mut self) -> Result<SessionStats, SessionError> {
        let asset_class = self.codec.asset_class();
        tracing::info!(
            %asset_class,
            mode = self.codec.mode().as_str(),
            "Feed session started"
        );

        loop {
            let next = tokio::select! {
                biased;
                () = self.cancel.cancelled() => {
                    tracing::info!(%asset_class, frames = self.stats.frames, "Feed session cancelled");
                    return Ok(self.stats);
                }
                next = self.connection.next_frame() => next,
            };

            match next {
                Some(Ok(frame)) => self.handle_frame(&frame).await?,
                Some(Err(e)) => {
                    tracing::warn!(%asset_class, error = %e, "Feed connection failed");
                    return Err(e.into());
                }
                None => {
                    tracing::info!(
                        %asset_class,
                        frames = self.stats.frames,
                        events = self.stats.events,
                        "Feed connection ended"
                    );
                    return Ok(self.stats);
                }
            }
        }
    }

    async fn handle_frame(&mut self, frame: &Frame) -> Result<(), SessionError> {
        let asset_class = self.codec.asset_class();
        let started = Instant::now();
        self.stats.frames += 1;
        metrics::record_frame(asset_class);

        let results = match self.codec.decode(frame) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(%asset_class, reason = %e.reason, frame = %e.frame, "Dropping malformed frame");
                self.stats.frame_errors += 1;
                metrics::record_frame_error(asset_class);
                self.sink.deliver(FeedEvent::FrameError(e)).await?;
                return Ok(());
            }
        };

        tracing::debug!(%asset_class, records = results.len(), "Decoded frame");
        metrics::record_decode_duration(asset_class, started.elapsed());

        for result in results {
            let item = match result {
                Ok(event) => {
                    self.stats.events += 1;
                    metrics::record_event(asset_class, event.kind());
                    FeedEvent::Event(event)
                }
                Err(e) => {
                    tracing::warn!(%asset_class, tag = ?e.tag(), error = %e, "Skipping undecodable record");
                    self.stats.record_errors += 1;
                    metrics::record_decode_error(asset_class, &e);
                    FeedEvent::RecordError(e)
                }
            };
            self.sink.deliver(item).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::MockFeedConnection;
    use crate::domain::asset_class::AssetClass;
    use crate::domain::errors::DecodeError;
    use crate::domain::subscription::{Channel, Subscription};

    /// Connection that replays scripted frames, then ends.
    struct ScriptedConnection {
        frames: VecDeque<Result<Frame, ConnectionError>>,
    }

    impl ScriptedConnection {
        fn new(frames: Vec<Result<Frame, ConnectionError>>) -> Self {
            Self {
                frames: frames.into(),
            }
        }
    }

    #[async_trait]
    impl FeedConnection for ScriptedConnection {
        async fn next_frame(&mut self) -> Option<Result<Frame, ConnectionError>> {
            self.frames.pop_front()
        }

        async fn send_directive(
            &mut self,
            _directive: &SubscriptionDirective,
        ) -> Result<(), ConnectionError> {
            Ok(())
        }
    }

    fn text(frame: &str) -> Result<Frame, ConnectionError> {
        Ok(Frame::from(frame))
    }

    #[tokio::test]
    async fn delivers_results_in_order() {
        let connection = ScriptedConnection::new(vec![
            text(r#"[{"ev":"status","status":"connected"}]"#),
            text(r#"[{"ev":"T","sym":"AAPL","p":1.5},{"ev":"??"},{"ev":"Q","sym":"MSFT"}]"#),
            text(r#"{"not":"an array"}"#),
        ]);
        let (tx, mut rx) = tokio::sync::mpsc::channel(16);
        let session = FeedSession::new(
            PolygonCodec::json(AssetClass::Equities),
            connection,
            tx,
            CancellationToken::new(),
        );

        let stats = session.run().await.unwrap();
        assert_eq!(
            stats,
            SessionStats {
                frames: 3,
                events: 3,
                record_errors: 1,
                frame_errors: 1,
            }
        );

        let mut items = Vec::new();
        while let Some(item) = rx.recv().await {
            items.push(item);
        }
        assert_eq!(items.len(), 5);
        assert!(items[0].as_event().is_some_and(|e| e.is_status()));
        assert_eq!(items[1].as_event().and_then(|e| e.symbol()), Some("AAPL"));
        assert!(matches!(
            items[2],
            FeedEvent::RecordError(DecodeError::UnknownEventType { .. })
        ));
        assert_eq!(items[3].as_event().and_then(|e| e.symbol()), Some("MSFT"));
        assert!(matches!(items[4], FeedEvent::FrameError(_)));
    }

    #[tokio::test]
    async fn transport_error_ends_session() {
        let connection = ScriptedConnection::new(vec![
            text(r#"[{"ev":"XT","pair":"BTC-USD"}]"#),
            Err(ConnectionError::Closed("reset by peer".to_string())),
            text(r#"[{"ev":"XT","pair":"ETH-USD"}]"#),
        ]);
        let mut sink: Vec<FeedEvent> = Vec::new();
        let session = FeedSession::new(
            PolygonCodec::json(AssetClass::Crypto),
            connection,
            &mut sink,
            CancellationToken::new(),
        );

        let err = session.run().await.unwrap_err();
        assert_eq!(
            err,
            SessionError::Connection(ConnectionError::Closed("reset by peer".to_string()))
        );
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn closed_sink_ends_session() {
        let connection = ScriptedConnection::new(vec![text(r#"[{"ev":"C","p":"EUR/USD"}]"#)]);
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        drop(rx);
        let session = FeedSession::new(
            PolygonCodec::json(AssetClass::Forex),
            connection,
            tx,
            CancellationToken::new(),
        );

        assert_eq!(session.run().await, Err(SessionError::SinkClosed(SinkClosed)));
    }

    #[tokio::test]
    async fn cancelled_session_stops_before_reading() {
        let connection = ScriptedConnection::new(vec![text(r#"[{"ev":"T","sym":"AAPL"}]"#)]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut sink: Vec<FeedEvent> = Vec::new();
        let session = FeedSession::new(
            PolygonCodec::json(AssetClass::Equities),
            connection,
            &mut sink,
            cancel,
        );
        assert_eq!(session.run().await, Ok(SessionStats::default()));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn apply_forwards_directive() {
        let directive = SubscriptionDirective::subscribe(vec![Subscription::new(
            Channel::StockTrades,
            "AAPL",
        )]);
        let expected = directive.clone();

        let mut connection = MockFeedConnection::new();
        connection
            .expect_send_directive()
            .withf(move |d| *d == expected)
            .times(1)
            .returning(|_| Ok(()));

        let mut session = FeedSession::new(
            PolygonCodec::json(AssetClass::Equities),
            connection,
            Vec::<FeedEvent>::new(),
            CancellationToken::new(),
        );
        session.apply(&directive).await.unwrap();
    }

    #[tokio::test]
    async fn apply_skips_empty_directive() {
        let mut connection = MockFeedConnection::new();
        connection.expect_send_directive().never();

        let mut session = FeedSession::new(
            PolygonCodec::json(AssetClass::Equities),
            connection,
            Vec::<FeedEvent>::new(),
            CancellationToken::new(),
        );
        session
            .apply(&SubscriptionDirective::unsubscribe(vec![]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn raw_mode_session_passes_frames_through() {
        let connection = ScriptedConnection::new(vec![Ok(Frame::from(vec![0xde, 0xad]))]);
        let mut sink: Vec<FeedEvent> = Vec::new();
        let stats = FeedSession::new(
            PolygonCodec::new(AssetClass::Crypto, crate::domain::frame::FrameMode::Raw),
            connection,
            &mut sink,
            CancellationToken::new(),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(stats.events, 1);
        assert_eq!(
            sink[0].as_event().map(crate::domain::events::Event::kind),
            Some(crate::domain::asset_class::RecordKind::RawUnclassified)
        );
    }
}
