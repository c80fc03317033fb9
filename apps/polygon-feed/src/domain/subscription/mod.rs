//! Subscription Directives
//!
//! Types the transport sends upstream to change what a connection receives.
//! Subscription state itself is tracked by the transport collaborator; this
//! module only names channels and shapes directives.
//!
//! # Wire Format (JSON)
//!
//! ```json
//! {"action": "subscribe", "params": "T.AAPL,Q.*"}
//! ```
//!
//! Each param is `<channel>.<symbol>`, where the channel prefix is the tag of
//! the events the channel produces and `*` selects every symbol.

use std::fmt;

use serde::Serialize;

use super::asset_class::AssetClass;

// =============================================================================
// Channels
// =============================================================================

/// Upstream data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Equities trades (`T`).
    StockTrades,
    /// Equities quotes (`Q`).
    StockQuotes,
    /// Equities second aggregates (`A`).
    StockSecondAggregates,
    /// Equities minute aggregates (`AM`).
    StockMinuteAggregates,
    /// Forex quotes (`C`).
    ForexQuotes,
    /// Forex minute aggregates (`CA`).
    ForexMinuteAggregates,
    /// Forex second aggregates (`CAS`).
    ForexSecondAggregates,
    /// Crypto trades (`XT`).
    CryptoTrades,
    /// Crypto per-exchange quotes (`XQT`).
    CryptoQuotes,
    /// Crypto minute aggregates (`XA`).
    CryptoMinuteAggregates,
    /// Crypto second aggregates (`XAS`).
    CryptoSecondAggregates,
    /// Crypto consolidated quotes (`XS`).
    CryptoConsolidatedQuotes,
    /// Crypto level 2 books (`XL2`).
    CryptoLevel2,
}

impl Channel {
    /// Every channel.
    pub const ALL: [Self; 13] = [
        Self::StockTrades,
        Self::StockQuotes,
        Self::StockSecondAggregates,
        Self::StockMinuteAggregates,
        Self::ForexQuotes,
        Self::ForexMinuteAggregates,
        Self::ForexSecondAggregates,
        Self::CryptoTrades,
        Self::CryptoQuotes,
        Self::CryptoMinuteAggregates,
        Self::CryptoSecondAggregates,
        Self::CryptoConsolidatedQuotes,
        Self::CryptoLevel2,
    ];

    /// Param prefix, equal to the tag of the events produced.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::StockTrades => "T",
            Self::StockQuotes => "Q",
            Self::StockSecondAggregates => "A",
            Self::StockMinuteAggregates => "AM",
            Self::ForexQuotes => "C",
            Self::ForexMinuteAggregates => "CA",
            Self::ForexSecondAggregates => "CAS",
            Self::CryptoTrades => "XT",
            Self::CryptoQuotes => "XQT",
            Self::CryptoMinuteAggregates => "XA",
            Self::CryptoSecondAggregates => "XAS",
            Self::CryptoConsolidatedQuotes => "XS",
            Self::CryptoLevel2 => "XL2",
        }
    }

    /// Asset class the channel belongs to.
    #[must_use]
    pub const fn asset_class(&self) -> AssetClass {
        match self {
            Self::StockTrades
            | Self::StockQuotes
            | Self::StockSecondAggregates
            | Self::StockMinuteAggregates => AssetClass::Equities,
            Self::ForexQuotes | Self::ForexMinuteAggregates | Self::ForexSecondAggregates => {
                AssetClass::Forex
            }
            Self::CryptoTrades
            | Self::CryptoQuotes
            | Self::CryptoMinuteAggregates
            | Self::CryptoSecondAggregates
            | Self::CryptoConsolidatedQuotes
            | Self::CryptoLevel2 => AssetClass::Crypto,
        }
    }

    /// Look up a channel by prefix within an asset class.
    #[must_use]
    pub fn from_prefix(asset_class: AssetClass, prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.asset_class() == asset_class && c.prefix() == prefix)
    }
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Symbol wildcard selecting every symbol on a channel.
pub const ALL_SYMBOLS: &str = "*";

/// Subscription parse errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    /// Param is not of the form `<channel>.<symbol>`.
    #[error("malformed subscription param: {0:?}")]
    Malformed(String),

    /// Channel prefix does not exist for the asset class.
    #[error("unknown {asset_class} channel: {prefix:?}")]
    UnknownChannel {
        /// Asset class the param was parsed under.
        asset_class: AssetClass,
        /// Offending prefix.
        prefix: String,
    },
}

/// One channel/symbol pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Data channel.
    pub channel: Channel,
    /// Ticker or pair, or [`ALL_SYMBOLS`].
    pub symbol: String,
}

impl Subscription {
    /// Create a subscription.
    #[must_use]
    pub fn new(channel: Channel, symbol: impl Into<String>) -> Self {
        Self {
            channel,
            symbol: symbol.into(),
        }
    }

    /// Subscribe to every symbol on a channel.
    #[must_use]
    pub fn all(channel: Channel) -> Self {
        Self::new(channel, ALL_SYMBOLS)
    }

    /// Parse a `<channel>.<symbol>` param under an asset class.
    ///
    /// The symbol may itself contain dots; only the first one separates.
    ///
    /// # Errors
    ///
    /// Returns an error if the param is malformed or the channel prefix is
    /// not valid for the asset class.
    pub fn parse(asset_class: AssetClass, param: &str) -> Result<Self, SubscriptionError> {
        let param = param.trim();
        let (prefix, symbol) = param
            .split_once('.')
            .filter(|(prefix, symbol)| !prefix.is_empty() && !symbol.is_empty())
            .ok_or_else(|| SubscriptionError::Malformed(param.to_string()))?;

        let channel = Channel::from_prefix(asset_class, prefix).ok_or_else(|| {
            SubscriptionError::UnknownChannel {
                asset_class,
                prefix: prefix.to_string(),
            }
        })?;

        Ok(Self::new(channel, symbol))
    }

    /// Parse a comma-separated param list, skipping empty entries.
    ///
    /// # Errors
    ///
    /// Returns the first param that fails to parse.
    pub fn parse_list(asset_class: AssetClass, params: &str) -> Result<Vec<Self>, SubscriptionError> {
        params
            .split(',')
            .filter(|p| !p.trim().is_empty())
            .map(|p| Self::parse(asset_class, p))
            .collect()
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.channel.prefix(), self.symbol)
    }
}

// =============================================================================
// Directives
// =============================================================================

/// Directive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveAction {
    /// Start receiving the listed channels.
    Subscribe,
    /// Stop receiving the listed channels.
    Unsubscribe,
}

/// Subscribe or unsubscribe request for a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDirective {
    /// Action to take.
    pub action: DirectiveAction,
    /// Channel/symbol pairs the action applies to.
    pub subscriptions: Vec<Subscription>,
}

impl SubscriptionDirective {
    /// Create a subscribe directive.
    #[must_use]
    pub const fn subscribe(subscriptions: Vec<Subscription>) -> Self {
        Self {
            action: DirectiveAction::Subscribe,
            subscriptions,
        }
    }

    /// Create an unsubscribe directive.
    #[must_use]
    pub const fn unsubscribe(subscriptions: Vec<Subscription>) -> Self {
        Self {
            action: DirectiveAction::Unsubscribe,
            subscriptions,
        }
    }

    /// Whether the directive names no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Comma-joined params, e.g. `T.AAPL,Q.*`.
    #[must_use]
    pub fn params(&self) -> String {
        self.subscriptions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Serialize for SubscriptionDirective {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            action: DirectiveAction,
            params: String,
        }

        Wire {
            action: self.action,
            params: self.params(),
        }
        .serialize(serializer)
    }
}
