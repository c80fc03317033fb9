//! Crypto Records
//!
//! Records from the `crypto` cluster. Crypto records carry two timestamps:
//! `t` as stamped by the exchange and `r` as received by the feed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::millis_to_datetime;

/// Per-exchange crypto quote with the last trade.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "XQT", "pair": "BTC-USD", "lp": 0, "ls": 0, "bp": 6495.35, "bs": 1.29,
///  "ap": 6495.36, "as": 0.05, "x": 1, "t": 1536036818784, "r": 1536036818790}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CryptoQuote {
    /// Wire tag (always "XQT")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Crypto pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    /// Last trade price
    #[serde(rename = "lp", skip_serializing_if = "Option::is_none")]
    pub last_trade_price: Option<f64>,

    /// Last trade size
    #[serde(rename = "ls", skip_serializing_if = "Option::is_none")]
    pub last_trade_size: Option<f64>,

    /// Bid price
    #[serde(rename = "bp", skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<f64>,

    /// Bid size
    #[serde(rename = "bs", skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<f64>,

    /// Ask price
    #[serde(rename = "ap", skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<f64>,

    /// Ask size
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<f64>,

    /// Exchange timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub exchange_timestamp_millis: Option<i64>,

    /// Exchange ID
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,

    /// Feed receive timestamp (epoch milliseconds)
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub received_timestamp_millis: Option<i64>,
}

impl CryptoQuote {
    /// Exchange timestamp.
    #[must_use]
    pub fn exchange_timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.exchange_timestamp_millis)
    }

    /// Feed receive timestamp.
    #[must_use]
    pub fn received_timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.received_timestamp_millis)
    }
}

/// Crypto trade.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "XT", "pair": "BTC-USD", "p": 6495.9, "s": 0.01, "c": [2],
///  "i": "8193457", "x": 1, "t": 1536036818784, "r": 1536036818790}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CryptoTrade {
    /// Wire tag (always "XT")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Crypto pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    /// Price
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Size
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Trade condition codes
    #[serde(rename = "c", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<i32>,

    /// Trade ID
    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,

    /// Exchange timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub exchange_timestamp_millis: Option<i64>,

    /// Exchange ID
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,

    /// Feed receive timestamp (epoch milliseconds)
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub received_timestamp_millis: Option<i64>,
}

impl CryptoTrade {
    /// Exchange timestamp.
    #[must_use]
    pub fn exchange_timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.exchange_timestamp_millis)
    }
}

/// Crypto minute (`XA`) or second (`XAS`) aggregate.
///
/// Each OHLC price comes with the exchange that printed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CryptoAggregate {
    /// Wire tag ("XA" or "XAS")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Crypto pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    /// Open price
    #[serde(rename = "o", skip_serializing_if = "Option::is_none")]
    pub open_price: Option<f64>,

    /// Open exchange ID
    #[serde(rename = "ox", skip_serializing_if = "Option::is_none")]
    pub open_exchange_id: Option<i64>,

    /// High price
    #[serde(rename = "h", skip_serializing_if = "Option::is_none")]
    pub high_price: Option<f64>,

    /// High exchange ID
    #[serde(rename = "hx", skip_serializing_if = "Option::is_none")]
    pub high_exchange_id: Option<i64>,

    /// Low price
    #[serde(rename = "l", skip_serializing_if = "Option::is_none")]
    pub low_price: Option<f64>,

    /// Low exchange ID
    #[serde(rename = "lx", skip_serializing_if = "Option::is_none")]
    pub low_exchange_id: Option<i64>,

    /// Close price
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub close_price: Option<f64>,

    /// Close exchange ID
    #[serde(rename = "cx", skip_serializing_if = "Option::is_none")]
    pub close_exchange_id: Option<i64>,

    /// Volume in the window
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Window start (epoch milliseconds)
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub start_timestamp_millis: Option<i64>,

    /// Window end (epoch milliseconds)
    #[serde(rename = "e", skip_serializing_if = "Option::is_none")]
    pub end_timestamp_millis: Option<i64>,
}

impl CryptoAggregate {
    /// Window start.
    #[must_use]
    pub fn start(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.start_timestamp_millis)
    }

    /// Window end.
    #[must_use]
    pub fn end(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.end_timestamp_millis)
    }
}

/// Best bid and ask across crypto exchanges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CryptoConsolidatedQuote {
    /// Wire tag (always "XS")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Crypto pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    /// Ask size
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<f64>,

    /// Ask price
    #[serde(rename = "ap", skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<f64>,

    /// Ask exchange ID
    #[serde(rename = "ax", skip_serializing_if = "Option::is_none")]
    pub ask_exchange_id: Option<i64>,

    /// Bid size
    #[serde(rename = "bs", skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<f64>,

    /// Bid price
    #[serde(rename = "bp", skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<f64>,

    /// Bid exchange ID
    #[serde(rename = "bx", skip_serializing_if = "Option::is_none")]
    pub bid_exchange_id: Option<i64>,

    /// Quote timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,
}

/// One price level of a book side, `[price, size]` on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct BookLevel {
    /// Level price
    pub price: f64,
    /// Size resting at the level
    pub size: f64,
}

impl From<BookLevel> for [f64; 2] {
    fn from(level: BookLevel) -> Self {
        [level.price, level.size]
    }
}

impl From<[f64; 2]> for BookLevel {
    fn from([price, size]: [f64; 2]) -> Self {
        Self { price, size }
    }
}

/// Level 2 book snapshot for one exchange.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "XL2", "pair": "BTC-USD", "b": [[6495.3, 0.5], [6495.1, 1.2]],
///  "a": [[6495.4, 0.2]], "x": 1, "t": 1536036818784, "r": 1536036818790}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CryptoLevel2Tick {
    /// Wire tag (always "XL2")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Crypto pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,

    /// Bid levels, best first
    #[serde(rename = "b", skip_serializing_if = "Vec::is_empty")]
    pub bids: Vec<BookLevel>,

    /// Ask levels, best first
    #[serde(rename = "a", skip_serializing_if = "Vec::is_empty")]
    pub asks: Vec<BookLevel>,

    /// Exchange timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,

    /// Exchange ID
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,

    /// Feed receive timestamp (epoch milliseconds)
    #[serde(rename = "r", skip_serializing_if = "Option::is_none")]
    pub received_timestamp_millis: Option<i64>,
}

impl CryptoLevel2Tick {
    /// Best bid level.
    #[must_use]
    pub fn best_bid(&self) -> Option<BookLevel> {
        self.bids.first().copied()
    }

    /// Best ask level.
    #[must_use]
    pub fn best_ask(&self) -> Option<BookLevel> {
        self.asks.first().copied()
    }
}
