//! Forex Records
//!
//! Records from the `forex` cluster. The quote names its pair `p`, while
//! the aggregate uses `pair`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::millis_to_datetime;

/// Forex quote.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "C", "p": "USD/CNH", "x": 44, "a": 6.83366, "b": 6.83363, "t": 1536036818784}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForexQuote {
    /// Wire tag (always "C")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Currency pair
    #[serde(rename = "p", skip_serializing_if = "Option::is_none")]
    pub currency_pair: Option<String>,

    /// Exchange ID
    #[serde(rename = "x", skip_serializing_if = "Option::is_none")]
    pub exchange_id: Option<i64>,

    /// Ask price
    #[serde(rename = "a", skip_serializing_if = "Option::is_none")]
    pub ask_price: Option<f64>,

    /// Bid price
    #[serde(rename = "b", skip_serializing_if = "Option::is_none")]
    pub bid_price: Option<f64>,

    /// Quote timestamp (epoch milliseconds)
    #[serde(rename = "t", skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,
}

impl ForexQuote {
    /// Quote timestamp.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.timestamp_millis)
    }
}

/// Forex minute (`CA`) or second (`CAS`) aggregate.
///
/// # Wire Format (JSON)
/// ```json
/// {"ev": "CA", "pair": "USD/EUR", "o": 0.8687, "c": 0.86889, "h": 0.86889,
///  "l": 0.8686, "v": 20, "s": 1539145740000, "e": 1539145800000}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForexAggregate {
    /// Wire tag ("CA" or "CAS")
    #[serde(rename = "ev")]
    pub event_type: String,

    /// Currency pair
    #[serde(rename = "pair", skip_serializing_if = "Option::is_none")]
    pub currency_pair: Option<String>,

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

    /// Ticks in the window
    #[serde(rename = "v", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Window start (epoch milliseconds)
    #[serde(rename = "s", skip_serializing_if = "Option::is_none")]
    pub start_timestamp_millis: Option<i64>,

    /// Window end (epoch milliseconds)
    #[serde(rename = "e", skip_serializing_if = "Option::is_none")]
    pub end_timestamp_millis: Option<i64>,
}

impl ForexAggregate {
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
