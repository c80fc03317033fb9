//! Line Replay Connection
//!
//! A [`FeedConnection`] that reads one frame per line from any async reader,
//! such as stdin or a captured session file. Lines are passed on as bytes:
//! valid UTF-8 becomes a text frame, anything else a binary frame, and the
//! codec decides what the frame means. Blank lines are skipped. Directives
//! are accepted and dropped since there is no upstream.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Split};

use crate::application::ports::{ConnectionError, FeedConnection};
use crate::domain::frame::Frame;
use crate::domain::subscription::SubscriptionDirective;

/// Replays newline-delimited frames.
pub struct LinesConnection<R> {
    lines: Split<R>,
    line_number: u64,
}

impl<R: AsyncBufRead + Unpin> LinesConnection<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_number: 0,
        }
    }
}

fn line_frame(line: Vec<u8>) -> Frame {
    match String::from_utf8(line) {
        Ok(text) => Frame::Text(text),
        Err(e) => Frame::Binary(e.into_bytes()),
    }
}

#[async_trait]
impl<R> FeedConnection for LinesConnection<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_frame(&mut self) -> Option<Result<Frame, ConnectionError>> {
        loop {
            self.line_number += 1;
            match self.lines.next_segment().await {
                Ok(Some(line)) if line.iter().all(u8::is_ascii_whitespace) => {}
                Ok(Some(line)) => return Some(Ok(line_frame(line))),
                Ok(None) => return None,
                Err(e) => {
                    return Some(Err(ConnectionError::Transport(format!(
                        "line {}: {e}",
                        self.line_number
                    ))));
                }
            }
        }
    }

    async fn send_directive(
        &mut self,
        directive: &SubscriptionDirective,
    ) -> Result<(), ConnectionError> {
        tracing::debug!(params = %directive.params(), "Replay ignores directive");
        Ok(())
    }
}
