//! Equities Records
//!
//! Records from the `stocks` cluster. Note that `c` is the condition list on
//! a trade, a single condition on a quote, and the close price on an
//! aggregate, and `s` is a size on a trade but a window start on an
//! aggregate.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::millis_to_datetime;

/// Equities trade.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "T", "sym": "MSFT", "x": 4, "i": "12345", "z": "3",
///  "p": 114.125, "s": 100, "c": [0, 12], "t": 1536036818784}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockTrade {
    /// Wire tag (always "T")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Ticker symbol
    #[serde(rename = "sym", skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Exchange ID
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,

    /// Trade ID
    #[serde(rename = "i", skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,

    /// Tape
    #[serde(rename = "z", skip_serializing_if = "Option::is_none")]
    pub tape: Option<String>,

    /// Price
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Size (shares)
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Trade condition codes
    #[serde(rename = "c", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<i32>,

    /// Trade timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,
}

impl StockTrade {
    /// Trade timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.timestamp_millis)
    }
}

/// Equities NBBO quote.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "Q", "sym": "MSFT", "bx": 4, "bp": 114.125, "bs": 100,
///  "ax": 7, "ap": 114.128, "as": 160, "c": 0, "t": 1536036818784}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockQuote {
    /// Wire tag (always "Q")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Ticker symbol
    #[serde(rename = "sym", skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Bid exchange ID
    #[serde(rename = "bx", skip_serializing_if = "Option::is_none")]
    pub bid_exchange_id: Option<i64>,

    /// Bid price
    #[serde(rename = "bp", skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<f64>,

    /// Bid size
    #[serde(rename = "bs", skip_serializing_if = "Option::is_none")]
    pub bid_size: Option<f64>,

    /// Ask exchange ID
    #[serde(rename = "ax", skip_serializing_if = "Option::is_none")]
    pub ask_exchange_id: Option<i64>,

    /// Ask price
    #[serde(rename = "ap", skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<f64>,

    /// Ask size
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub ask_size: Option<f64>,

    /// Quote condition code
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub condition: Option<i32>,

    /// Quote timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,
}

impl StockQuote {
    /// Quote timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.timestamp_millis)
    }
}

/// Equities second (`A`) or minute (`AM`) aggregate.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "AM", "sym": "MSFT", "v": 10204, "av": 200304, "op": 114.04,
///  "vw": 114.4040, "o": 114.11, "c": 114.14, "h": 114.19, "l": 114.09,
///  "a": 114.1314, "s": 1536036818784, "e": 1536036818784}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockAggregate {
    /// Wire tag ("A" or "AM")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Ticker symbol
    #[serde(rename = "sym", skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,

    /// Tick volume
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Accumulated volume for the day
    #[serde(rename = "av", skip_serializing_if = "Option::is_none")]
    pub accumulated_volume: Option<f64>,

    /// Official opening price for the day
    #[serde(rename = "op", skip_serializing_if = "Option::is_none")]
    pub official_open_price: Option<f64>,

    /// Volume-weighted average price for the window
    #[serde(rename = "vw", skip_serializing_if = "Option::is_none")]
    pub volume_weighted_average_price: Option<f64>,

    /// Open price
    #[serde(rename = "o", skip_serializing_if = "Option::is_none")]
    pub open_price: Option<f64>,

    /// Close price
    #[serde(rename = "c", skip_serializing_if = "Option::is_none")]
    pub close_price: Option<f64>,

    /// High price
    #[serde(rename = "h", skip_serializing_if = "Option::is_none")]
    pub high_price: Option<f64>,

    /// Low price
    #[serde(rename = "l", skip_serializing_if = "Option::is_none")]
    pub low_price: Option<f64>,

    /// Average trade price for the day
    #[serde(rename = "a", skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,

    /// Window start (epoch milliseconds)
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub start_timestamp_millis: Option<i64>,

    /// Window end (epoch milliseconds)
    #[serde(rename = "e", skip_serializing_if = "Option::is_none")]
    pub end_timestamp_millis: Option<i64>,
}

impl StockAggregate {
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
