//! Configuration Module
//!
//! Environment-driven configuration for a feed connection.

mod settings;

pub use settings::{ApiKey, ConfigError, DEFAULT_EVENT_CAPACITY, FeedConfig};
