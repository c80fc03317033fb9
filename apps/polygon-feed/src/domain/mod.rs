//! Domain Layer - Core feed types.
//!
//! Pure data types for the decoded feed: asset classes, record kinds, the
//! typed event model, raw transport frames, decode errors, and subscription
//! directives. Nothing here performs I/O.

/// Asset classes and record kinds.
pub mod asset_class;

/// Decode error taxonomy.
pub mod errors;

/// Typed market data events.
pub mod events;

/// Raw transport frames.
pub mod frame;

/// Subscription channels and directives.
pub mod subscription;
