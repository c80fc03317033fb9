#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements,
        clippy::unreadable_literal
    )
)]

//! Polygon Feed - Real-time Market Data Decoder
//!
//! Turns raw frames from Polygon's real-time WebSocket clusters (equities,
//! forex, crypto) into typed events. Each frame is split into records, each
//! record is classified by its `ev` tag within the connection's asset class,
//! and its fields are decoded into a fixed schema for that kind.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Event model and error taxonomy
//!   - `events`: Trades, quotes, aggregates, level 2 books, status
//!   - `errors`: Frame-level and record-level decode failures
//!   - `subscription`: Channels and subscribe/unsubscribe directives
//!
//! - **Application**: Port definitions
//!   - `ports`: Transport connection and event sink contracts
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `polygon`: Frame splitter, tag tables, codec, feed session
//!   - `config`: Environment configuration
//!   - `metrics`: Prometheus counters
//!   - `telemetry`: Tracing subscriber and OTLP export
//!
//! # Data Flow
//!
//! ```text
//! FeedConnection ──► Frame ──► split ──► [record...] ──► classify ──► decode ──► EventSink
//!                                │                          │             │
//!                                ▼                          ▼             ▼
//!                         FrameFormatError          UnknownEventType  FieldTypeMismatch
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Event model with no I/O.
pub mod domain;

/// Application layer - Port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::asset_class::{AssetClass, RecordKind};
pub use domain::errors::{DecodeError, FrameFormatError};
pub use domain::events::{
    BookLevel, CryptoAggregate, CryptoConsolidatedQuote, CryptoEvent, CryptoLevel2Tick,
    CryptoQuote, CryptoTrade, Event, ForexAggregate, ForexEvent, ForexQuote, RawMessage,
    StatusMessage, StockAggregate, StockQuote, StockTrade, StocksEvent,
};
pub use domain::frame::{Frame, FrameMode};
pub use domain::subscription::{
    Channel, DirectiveAction, Subscription, SubscriptionDirective, SubscriptionError,
};

// Ports
pub use application::ports::{ConnectionError, EventSink, FeedConnection, FeedEvent, SinkClosed};

// Codec and session
pub use infrastructure::polygon::{
    EncodeError, FeedSession, FrameResult, PolygonCodec, RecordResult, SessionError, SessionStats,
    decode_record, encode_record,
};

// Infrastructure config
pub use infrastructure::config::{ApiKey, ConfigError, FeedConfig};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{
    TelemetryConfig, TelemetryError, TelemetryGuard, init as init_telemetry,
};
