//! Asset Classes and Record Kinds
//!
//! The asset class is the market segment a connection is subscribed to. It
//! scopes which event tags are valid: the same tag can be meaningless or mean
//! something else under another asset class.

use std::fmt;

/// Market segment context for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// US equities (the `stocks` cluster).
    Equities,
    /// Foreign exchange currency pairs.
    Forex,
    /// Crypto currency pairs.
    Crypto,
}

impl AssetClass {
    /// Every asset class, in declaration order.
    pub const ALL: [Self; 3] = [Self::Equities, Self::Forex, Self::Crypto];

    /// Parse an asset class name, case-insensitively.
    ///
    /// Accepts the cluster names used in stream URLs (`stocks`, `forex`,
    /// `crypto`) as well as `equities` and `fx`.
    #[must_use]
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "stocks" | "equities" => Some(Self::Equities),
            "forex" | "fx" => Some(Self::Forex),
            "crypto" => Some(Self::Crypto),
            _ => None,
        }
    }

    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equities => "equities",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
        }
    }

    /// Cluster name used in stream URLs.
    #[must_use]
    pub const fn cluster(&self) -> &'static str {
        match self {
            Self::Equities => "stocks",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record carried by an event, independent of asset class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Executed trade.
    Trade,
    /// Top-of-book quote.
    Quote,
    /// OHLC aggregate bar.
    Aggregate,
    /// Best bid/ask consolidated across exchanges (crypto only).
    ConsolidatedQuote,
    /// Level 2 book snapshot (crypto only).
    Level2Tick,
    /// Control message (auth result, subscription ack, error notice).
    Status,
    /// Opaque payload passed through without decoding.
    RawUnclassified,
}

impl RecordKind {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trade => "trade",
            Self::Quote => "quote",
            Self::Aggregate => "aggregate",
            Self::ConsolidatedQuote => "consolidated_quote",
            Self::Level2Tick => "level2_tick",
            Self::Status => "status",
            Self::RawUnclassified => "raw",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_class_parsing() {
        assert_eq!(
            AssetClass::from_str_case_insensitive("stocks"),
            Some(AssetClass::Equities)
        );
        assert_eq!(
            AssetClass::from_str_case_insensitive("EQUITIES"),
            Some(AssetClass::Equities)
        );
        assert_eq!(
            AssetClass::from_str_case_insensitive("Fx"),
            Some(AssetClass::Forex)
        );
        assert_eq!(
            AssetClass::from_str_case_insensitive(" crypto "),
            Some(AssetClass::Crypto)
        );
        assert_eq!(AssetClass::from_str_case_insensitive("options"), None);
    }

    #[test]
    fn cluster_names() {
        assert_eq!(AssetClass::Equities.cluster(), "stocks");
        assert_eq!(AssetClass::Forex.cluster(), "forex");
        assert_eq!(AssetClass::Crypto.cluster(), "crypto");
    }

    #[test]
    fn display_matches_label() {
        for class in AssetClass::ALL {
            assert_eq!(class.to_string(), class.as_str());
        }
        assert_eq!(RecordKind::Level2Tick.to_string(), "level2_tick");
    }
}
