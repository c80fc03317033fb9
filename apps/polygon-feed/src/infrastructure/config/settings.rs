//! Feed Configuration Settings
//!
//! Configuration for one feed connection, loaded from environment variables.

use tokio::sync::mpsc;

use crate::application::ports::FeedEvent;
use crate::domain::asset_class::AssetClass;
use crate::domain::frame::FrameMode;
use crate::domain::subscription::{Subscription, SubscriptionDirective, SubscriptionError};
use crate::infrastructure::polygon::codec::PolygonCodec;

/// Default capacity of the session's event channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 10_000;

const STREAM_HOST: &str = "wss://socket.polygon.io";

/// Polygon API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key.
    #[must_use]
    pub const fn new(key: String) -> Self {
        Self(key)
    }

    /// The key itself, for the transport's auth message.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Complete feed configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// Asset class of the connection.
    pub asset_class: AssetClass,
    /// Whether frames are JSON or passed through raw.
    pub frame_mode: FrameMode,
    /// Capacity of the session's event channel.
    pub event_capacity: usize,
    /// Subscriptions to request once connected.
    pub subscriptions: Vec<Subscription>,
    /// API key for the transport, if set.
    pub api_key: Option<ApiKey>,
}

impl FeedConfig {
    /// Create a JSON-mode configuration with defaults.
    #[must_use]
    pub const fn new(asset_class: AssetClass) -> Self {
        Self {
            asset_class,
            frame_mode: FrameMode::Json,
            event_capacity: DEFAULT_EVENT_CAPACITY,
            subscriptions: Vec::new(),
            api_key: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `POLYGON_ASSET_CLASS` is missing or any variable
    /// holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`FeedConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_class = required(&lookup, "POLYGON_ASSET_CLASS")?;
        let asset_class = AssetClass::from_str_case_insensitive(&raw_class)
            .ok_or_else(|| ConfigError::invalid("POLYGON_ASSET_CLASS", &raw_class))?;

        let frame_mode = match lookup("POLYGON_FRAME_MODE") {
            Some(raw) => FrameMode::from_str_case_insensitive(&raw)
                .ok_or_else(|| ConfigError::invalid("POLYGON_FRAME_MODE", &raw))?,
            None => FrameMode::default(),
        };

        let event_capacity = match lookup("POLYGON_EVENT_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::invalid("POLYGON_EVENT_CAPACITY", &raw))?,
            None => DEFAULT_EVENT_CAPACITY,
        };

        let subscriptions = match lookup("POLYGON_SUBSCRIPTIONS") {
            Some(raw) => Subscription::parse_list(asset_class, &raw)?,
            None => Vec::new(),
        };

        let api_key = lookup("POLYGON_API_KEY")
            .filter(|k| !k.is_empty())
            .map(ApiKey::new);

        Ok(Self {
            asset_class,
            frame_mode,
            event_capacity,
            subscriptions,
            api_key,
        })
    }

    /// Codec for this connection.
    #[must_use]
    pub const fn codec(&self) -> PolygonCodec {
        PolygonCodec::new(self.asset_class, self.frame_mode)
    }

    /// Cluster WebSocket URL for the transport adapter.
    #[must_use]
    pub fn stream_url(&self) -> String {
        format!("{STREAM_HOST}/{}", self.asset_class.cluster())
    }

    /// Directive requesting the configured subscriptions.
    #[must_use]
    pub fn initial_directive(&self) -> SubscriptionDirective {
        SubscriptionDirective::subscribe(self.subscriptions.clone())
    }

    /// Bounded channel to use as the session sink.
    #[must_use]
    pub fn event_channel(&self) -> (mpsc::Sender<FeedEvent>, mpsc::Receiver<FeedEvent>) {
        mpsc::channel(self.event_capacity)
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable holds a value that cannot be used.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },
    /// Initial subscriptions could not be parsed.
    #[error("invalid subscriptions: {0}")]
    Subscription(#[from] SubscriptionError),
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::subscription::{Channel, DirectiveAction};

    fn load(vars: &[(&str, &str)]) -> Result<FeedConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        FeedConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_only_asset_class() {
        let config = load(&[("POLYGON_ASSET_CLASS", "crypto")]).unwrap();
        assert_eq!(config, FeedConfig::new(AssetClass::Crypto));
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
        assert_eq!(config.codec(), PolygonCodec::json(AssetClass::Crypto));
    }

    #[test]
    fn asset_class_aliases() {
        for (raw, expected) in [
            ("stocks", AssetClass::Equities),
            ("EQUITIES", AssetClass::Equities),
            ("fx", AssetClass::Forex),
            ("Forex", AssetClass::Forex),
        ] {
            assert_eq!(load(&[("POLYGON_ASSET_CLASS", raw)]).unwrap().asset_class, expected);
        }
    }

    #[test]
    fn missing_asset_class() {
        assert_eq!(
            load(&[]),
            Err(ConfigError::MissingEnvVar("POLYGON_ASSET_CLASS".to_string()))
        );
        assert_eq!(
            load(&[("POLYGON_ASSET_CLASS", "  ")]),
            Err(ConfigError::EmptyValue("POLYGON_ASSET_CLASS".to_string()))
        );
    }

    #[test]
    fn invalid_asset_class() {
        assert_eq!(
            load(&[("POLYGON_ASSET_CLASS", "options")]),
            Err(ConfigError::InvalidValue {
                key: "POLYGON_ASSET_CLASS".to_string(),
                value: "options".to_string(),
            })
        );
    }

    #[test]
    fn raw_frame_mode() {
        let config = load(&[("POLYGON_ASSET_CLASS", "crypto"), ("POLYGON_FRAME_MODE", "RAW")]).unwrap();
        assert_eq!(config.frame_mode, FrameMode::Raw);
        assert_eq!(config.codec().mode(), FrameMode::Raw);
    }

    #[test]
    fn invalid_frame_mode_and_capacity() {
        assert!(matches!(
            load(&[("POLYGON_ASSET_CLASS", "crypto"), ("POLYGON_FRAME_MODE", "msgpack")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("POLYGON_ASSET_CLASS", "crypto"), ("POLYGON_EVENT_CAPACITY", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[("POLYGON_ASSET_CLASS", "crypto"), ("POLYGON_EVENT_CAPACITY", "lots")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn subscriptions_are_parsed_for_asset_class() {
        let config = load(&[
            ("POLYGON_ASSET_CLASS", "stocks"),
            ("POLYGON_SUBSCRIPTIONS", "T.AAPL, Q.*"),
        ])
        .unwrap();
        assert_eq!(
            config.subscriptions,
            vec![
                Subscription::new(Channel::StockTrades, "AAPL"),
                Subscription::all(Channel::StockQuotes),
            ]
        );

        let directive = config.initial_directive();
        assert_eq!(directive.action, DirectiveAction::Subscribe);
        assert_eq!(directive.params(), "T.AAPL,Q.*");
    }

    #[test]
    fn subscriptions_from_other_asset_class_rejected() {
        let err = load(&[
            ("POLYGON_ASSET_CLASS", "forex"),
            ("POLYGON_SUBSCRIPTIONS", "XT.BTC-USD"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Subscription(_)));
    }

    #[test]
    fn stream_url_per_cluster() {
        assert_eq!(
            FeedConfig::new(AssetClass::Equities).stream_url(),
            "wss://socket.polygon.io/stocks"
        );
        assert_eq!(
            FeedConfig::new(AssetClass::Forex).stream_url(),
            "wss://socket.polygon.io/forex"
        );
        assert_eq!(
            FeedConfig::new(AssetClass::Crypto).stream_url(),
            "wss://socket.polygon.io/crypto"
        );
    }

    #[test]
    fn api_key_redacted_debug() {
        let config = load(&[("POLYGON_ASSET_CLASS", "crypto"), ("POLYGON_API_KEY", "secret123")]).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));
        assert_eq!(config.api_key.as_ref().map(ApiKey::expose), Some("secret123"));
    }

    #[tokio::test]
    async fn event_channel_uses_capacity() {
        let mut config = FeedConfig::new(AssetClass::Crypto);
        config.event_capacity = 2;
        let (tx, _rx) = config.event_channel();
        assert_eq!(tx.max_capacity(), 2);
    }
}
