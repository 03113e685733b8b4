//! Shared kernel for the Gridwork admin-listing toolkit.
//!
//! Holds the pieces every Gridwork crate depends on: the workspace error
//! type, domain event definitions and topic derivation, the event relay
//! that fans events out to subscribers, and TOML-backed configuration.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod relay;

pub use config::{GridworkConfig, RelayConfig, TablePresets};
pub use error::{GridworkError, Result};
pub use events::{event_topic, DomainEvent, PublishedEvent};
pub use relay::EventRelay;
