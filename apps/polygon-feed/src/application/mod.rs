//! Application Layer - Port definitions.
//!
//! This layer defines how the decode core meets the outside world: the
//! transport connection it reads frames from and the sink it hands results
//! to.

/// Port interfaces for the transport and the event sink.
pub mod ports;
