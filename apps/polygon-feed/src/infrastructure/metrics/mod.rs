//! Prometheus Metrics Module
//!
//! Decode counters and latencies for the feed, labelled by asset class.
//!
//! # Metrics
//!
//! - `polygon_feed_frames_total`: frames received
//! - `polygon_feed_events_decoded_total`: records decoded, by kind
//! - `polygon_feed_decode_errors_total`: records rejected, by error
//! - `polygon_feed_frame_errors_total`: frames rejected as a whole
//! - `polygon_feed_frame_decode_seconds`: time to decode one frame
//!
//! Recording is a no-op until a recorder is installed, so the decode path
//! can call these unconditionally.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

use crate::domain::asset_class::{AssetClass, RecordKind};
use crate::domain::errors::DecodeError;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder.
///
/// Later calls return the handle from the first successful call.
///
/// # Errors
///
/// Returns an error if the recorder cannot be installed, for example because
/// another global recorder is already set.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(handle.clone());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(PROMETHEUS_HANDLE.get_or_init(|| handle).clone())
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "polygon_feed_frames_total",
        "Total frames received from the feed"
    );
    describe_counter!(
        "polygon_feed_events_decoded_total",
        "Total records decoded into events"
    );
    describe_counter!(
        "polygon_feed_decode_errors_total",
        "Total records that failed to decode by error type"
    );
    describe_counter!(
        "polygon_feed_frame_errors_total",
        "Total frames rejected as malformed"
    );
    describe_histogram!(
        "polygon_feed_frame_decode_seconds",
        "Time to split and decode one frame"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Record a frame received.
pub fn record_frame(asset_class: AssetClass) {
    counter!(
        "polygon_feed_frames_total",
        "asset_class" => asset_class.as_str()
    )
    .increment(1);
}

/// Record a decoded event.
pub fn record_event(asset_class: AssetClass, kind: RecordKind) {
    counter!(
        "polygon_feed_events_decoded_total",
        "asset_class" => asset_class.as_str(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// Record a record-level decode failure.
pub fn record_decode_error(asset_class: AssetClass, error: &DecodeError) {
    counter!(
        "polygon_feed_decode_errors_total",
        "asset_class" => asset_class.as_str(),
        "error" => error.as_str()
    )
    .increment(1);
}

/// Record a rejected frame.
pub fn record_frame_error(asset_class: AssetClass) {
    counter!(
        "polygon_feed_frame_errors_total",
        "asset_class" => asset_class.as_str()
    )
    .increment(1);
}

/// Record frame decode duration.
pub fn record_decode_duration(asset_class: AssetClass, duration: Duration) {
    histogram!(
        "polygon_feed_frame_decode_seconds",
        "asset_class" => asset_class.as_str()
    )
    .record(duration.as_secs_f64());
}

// =============================================================================
// Tests
// =============================================================================
