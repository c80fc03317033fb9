//! Polygon Feed Replay Binary
//!
//! Decodes captured frames, one per line on stdin, and writes each decoded
//! record to stdout as a JSON line. Decode failures are logged and counted.
//!
//! # Usage
//!
//! ```bash
//! POLYGON_ASSET_CLASS=crypto polygon-feed < capture.ndjson
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `POLYGON_ASSET_CLASS`: stocks | forex | crypto
//!
//! ## Optional
//! - `POLYGON_FRAME_MODE`: json | raw (default: json)
//! - `POLYGON_EVENT_CAPACITY`: Event channel capacity (default: 10000)
//! - `POLYGON_SUBSCRIPTIONS`: Initial params, e.g. `XT.BTC-USD,XL2.*`
//! - `OTEL_ENABLED`: Enable OpenTelemetry (default: true)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP endpoint (default: <http://localhost:4318>)
//! - `OTEL_SERVICE_NAME`: Service name (default: polygon-feed)
//! - `RUST_LOG`: Log level (default: info)

use polygon_feed::infrastructure::replay::LinesConnection;
use polygon_feed::infrastructure::telemetry;
use polygon_feed::{Event, FeedConfig, FeedEvent, FeedSession, encode_record, init_metrics};
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _telemetry_guard = telemetry::init()?;
    let _metrics_handle = init_metrics()?;

    let config = FeedConfig::from_env()?;
    log_config(&config);

    let shutdown_token = CancellationToken::new();
    tokio::spawn(await_shutdown(shutdown_token.clone()));

    let (event_tx, event_rx) = config.event_channel();
    let connection = LinesConnection::new(BufReader::new(tokio::io::stdin()));
    let mut session = FeedSession::new(config.codec(), connection, event_tx, shutdown_token);
    session.apply(&config.initial_directive()).await?;

    let (stats, written) = tokio::join!(session.run(), write_events(event_rx));
    let stats = stats?;
    let written = written?;

    tracing::info!(
        frames = stats.frames,
        events = stats.events,
        record_errors = stats.record_errors,
        frame_errors = stats.frame_errors,
        written,
        "Replay finished"
    );
    Ok(())
}

/// Write decoded events to stdout, one JSON record per line.
async fn write_events(mut event_rx: mpsc::Receiver<FeedEvent>) -> std::io::Result<u64> {
    let mut stdout = tokio::io::stdout();
    let mut written = 0;

    while let Some(item) = event_rx.recv().await {
        let FeedEvent::Event(event) = item else {
            continue;
        };

        let line = match &event {
            Event::Raw(raw) => serde_json::json!({ "raw_bytes": raw.data.len() }).to_string(),
            _ => match encode_record(&event) {
                Ok(record) => record.to_string(),
                Err(e) => {
                    tracing::warn!(error = %e, kind = %event.kind(), "Failed to encode event");
                    continue;
                }
            },
        };

        stdout.write_all(line.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        written += 1;
    }

    stdout.flush().await?;
    Ok(written)
}

fn log_config(config: &FeedConfig) {
    tracing::info!(
        asset_class = %config.asset_class,
        frame_mode = config.frame_mode.as_str(),
        event_capacity = config.event_capacity,
        subscriptions = config.subscriptions.len(),
        stream_url = %config.stream_url(),
        "Loaded configuration"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping replay");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping replay");
        }
    }

    shutdown_token.cancel();
}
