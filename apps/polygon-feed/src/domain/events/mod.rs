//! Market Data Events
//!
//! The decoded, strongly-typed representation of one feed record.
//!
//! # Shape
//!
//! ```text
//! Event
//! ├── Status(StatusMessage)          any asset class
//! ├── Stocks(StocksEvent)            Trade | Quote | Aggregate
//! ├── Forex(ForexEvent)              Quote | Aggregate
//! ├── Crypto(CryptoEvent)            Trade | Quote | Aggregate | ConsolidatedQuote | Level2Tick
//! └── Raw(RawMessage)                opaque passthrough
//! ```
//!
//! Every wire field is an `Option` (or an empty `Vec` for list fields), so
//! "not reported" stays distinct from zero. Serializing an event yields its
//! wire record again, with absent fields omitted.

mod crypto;
mod forex;
mod status;
mod stocks;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::asset_class::{AssetClass, RecordKind};

pub use crypto::{
    BookLevel, CryptoAggregate, CryptoConsolidatedQuote, CryptoLevel2Tick, CryptoQuote,
    CryptoTrade,
};
pub use forex::{ForexAggregate, ForexQuote};
pub use status::StatusMessage;
pub use stocks::{StockAggregate, StockQuote, StockTrade};

/// Convert wire milliseconds to a UTC timestamp.
///
/// Out-of-range values are treated as not reported.
pub(crate) fn millis_to_datetime(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

// =============================================================================
// Unified Event
// =============================================================================

/// One decoded feed record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    /// Control message, valid under every asset class.
    Status(StatusMessage),

    /// Equities record.
    Stocks(StocksEvent),

    /// Forex record.
    Forex(ForexEvent),

    /// Crypto record.
    Crypto(CryptoEvent),

    /// Opaque payload from a raw-mode connection. Has no wire record form.
    #[serde(skip_serializing)]
    Raw(RawMessage),
}

impl Event {
    /// Wire tag of the record, `None` for raw passthrough.
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Self::Status(m) => Some(&m.event_type),
            Self::Stocks(e) => Some(e.event_type()),
            Self::Forex(e) => Some(e.event_type()),
            Self::Crypto(e) => Some(e.event_type()),
            Self::Raw(_) => None,
        }
    }

    /// Record kind.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Status(_) => RecordKind::Status,
            Self::Stocks(e) => e.kind(),
            Self::Forex(e) => e.kind(),
            Self::Crypto(e) => e.kind(),
            Self::Raw(_) => RecordKind::RawUnclassified,
        }
    }

    /// Asset class of a data event, `None` for status and raw records.
    #[must_use]
    pub const fn asset_class(&self) -> Option<AssetClass> {
        match self {
            Self::Stocks(_) => Some(AssetClass::Equities),
            Self::Forex(_) => Some(AssetClass::Forex),
            Self::Crypto(_) => Some(AssetClass::Crypto),
            Self::Status(_) | Self::Raw(_) => None,
        }
    }

    /// Ticker or currency pair, when reported.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Stocks(e) => e.symbol(),
            Self::Forex(e) => e.symbol(),
            Self::Crypto(e) => e.symbol(),
            Self::Status(_) | Self::Raw(_) => None,
        }
    }

    /// Primary timestamp in epoch milliseconds, when reported.
    ///
    /// For aggregates this is the window start.
    #[must_use]
    pub const fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Stocks(e) => e.timestamp_millis(),
            Self::Forex(e) => e.timestamp_millis(),
            Self::Crypto(e) => e.timestamp_millis(),
            Self::Status(_) | Self::Raw(_) => None,
        }
    }

    /// Whether this is a control message.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}

// =============================================================================
// Per-Asset-Class Events
// =============================================================================

/// Equities record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StocksEvent {
    /// Trade (`T`).
    Trade(StockTrade),
    /// Quote (`Q`).
    Quote(StockQuote),
    /// Second (`A`) or minute (`AM`) aggregate.
    Aggregate(StockAggregate),
}

impl StocksEvent {
    /// Wire tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::Trade(m) => &m.event_type,
            Self::Quote(m) => &m.event_type,
            Self::Aggregate(m) => &m.event_type,
        }
    }

    /// Record kind.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Trade(_) => RecordKind::Trade,
            Self::Quote(_) => RecordKind::Quote,
            Self::Aggregate(_) => RecordKind::Aggregate,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Trade(m) => m.ticker.as_deref(),
            Self::Quote(m) => m.ticker.as_deref(),
            Self::Aggregate(m) => m.ticker.as_deref(),
        }
    }

    /// Primary timestamp in epoch milliseconds.
    #[must_use]
    pub const fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Trade(m) => m.timestamp_millis,
            Self::Quote(m) => m.timestamp_millis,
            Self::Aggregate(m) => m.start_timestamp_millis,
        }
    }
}

/// Forex record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForexEvent {
    /// Quote (`C`).
    Quote(ForexQuote),
    /// Minute (`CA`) or second (`CAS`) aggregate.
    Aggregate(ForexAggregate),
}

impl ForexEvent {
    /// Wire tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::Quote(m) => &m.event_type,
            Self::Aggregate(m) => &m.event_type,
        }
    }

    /// Record kind.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Quote(_) => RecordKind::Quote,
            Self::Aggregate(_) => RecordKind::Aggregate,
        }
    }

    /// Currency pair.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Quote(m) => m.currency_pair.as_deref(),
            Self::Aggregate(m) => m.currency_pair.as_deref(),
        }
    }

    /// Primary timestamp in epoch milliseconds.
    #[must_use]
    pub const fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Quote(m) => m.timestamp_millis,
            Self::Aggregate(m) => m.start_timestamp_millis,
        }
    }
}

/// Crypto record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CryptoEvent {
    /// Trade (`XT`).
    Trade(CryptoTrade),
    /// Per-exchange quote (`XQT`).
    Quote(CryptoQuote),
    /// Minute (`XA`) or second (`XAS`) aggregate.
    Aggregate(CryptoAggregate),
    /// Consolidated best bid/ask (`XS`).
    ConsolidatedQuote(CryptoConsolidatedQuote),
    /// Level 2 book snapshot (`XL2`).
    Level2Tick(CryptoLevel2Tick),
}

impl CryptoEvent {
    /// Wire tag.
    #[must_use]
    pub fn event_type(&self) -> &str {
        match self {
            Self::Trade(m) => &m.event_type,
            Self::Quote(m) => &m.event_type,
            Self::Aggregate(m) => &m.event_type,
            Self::ConsolidatedQuote(m) => &m.event_type,
            Self::Level2Tick(m) => &m.event_type,
        }
    }

    /// Record kind.
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Trade(_) => RecordKind::Trade,
            Self::Quote(_) => RecordKind::Quote,
            Self::Aggregate(_) => RecordKind::Aggregate,
            Self::ConsolidatedQuote(_) => RecordKind::ConsolidatedQuote,
            Self::Level2Tick(_) => RecordKind::Level2Tick,
        }
    }

    /// Crypto pair.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Trade(m) => m.pair.as_deref(),
            Self::Quote(m) => m.pair.as_deref(),
            Self::Aggregate(m) => m.pair.as_deref(),
            Self::ConsolidatedQuote(m) => m.pair.as_deref(),
            Self::Level2Tick(m) => m.pair.as_deref(),
        }
    }

    /// Primary timestamp in epoch milliseconds.
    #[must_use]
    pub const fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Trade(m) => m.exchange_timestamp_millis,
            Self::Quote(m) => m.exchange_timestamp_millis,
            Self::Aggregate(m) => m.start_timestamp_millis,
            Self::ConsolidatedQuote(m) => m.timestamp_millis,
            Self::Level2Tick(m) => m.timestamp_millis,
        }
    }
}

// =============================================================================
// Raw Passthrough
// =============================================================================

/// Opaque frame payload from a raw-mode connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    /// Payload bytes, unmodified.
    pub data: Vec<u8>,
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! into_event {
    ($($ty:ty => $outer:ident :: $inner:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Event {
                fn from(message: $ty) -> Self {
                    Self::$outer($inner::from(message))
                }
            }
        )+
    };
}

macro_rules! into_class_event {
    ($($ty:ty => $class:ident :: $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for $class {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )+
    };
}

into_class_event! {
    StockTrade => StocksEvent::Trade,
    StockQuote => StocksEvent::Quote,
    StockAggregate => StocksEvent::Aggregate,
    ForexQuote => ForexEvent::Quote,
    ForexAggregate => ForexEvent::Aggregate,
    CryptoTrade => CryptoEvent::Trade,
    CryptoQuote => CryptoEvent::Quote,
    CryptoAggregate => CryptoEvent::Aggregate,
    CryptoConsolidatedQuote => CryptoEvent::ConsolidatedQuote,
    CryptoLevel2Tick => CryptoEvent::Level2Tick,
}

into_event! {
    StockTrade => Stocks::StocksEvent,
    StockQuote => Stocks::StocksEvent,
    StockAggregate => Stocks::StocksEvent,
    ForexQuote => Forex::ForexEvent,
    ForexAggregate => Forex::ForexEvent,
    CryptoTrade => Crypto::CryptoEvent,
    CryptoQuote => Crypto::CryptoEvent,
    CryptoAggregate => Crypto::CryptoEvent,
    CryptoConsolidatedQuote => Crypto::CryptoEvent,
    CryptoLevel2Tick => Crypto::CryptoEvent,
}

impl From<StatusMessage> for Event {
    fn from(message: StatusMessage) -> Self {
        Self::Status(message)
    }
}

impl From<RawMessage> for Event {
    fn from(message: RawMessage) -> Self {
        Self::Raw(message)
    }
}
