//! Domain event definitions and topic derivation.
//!
//! Gridwork publishes host-defined events, so the event contract is an open
//! trait rather than a closed enum. Subscribers receive a [`PublishedEvent`]
//! envelope and downcast the payload to the concrete type they care about.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A domain event that can be relayed to subscribers.
///
/// Implementors report their own type path; the usual implementation is
/// `std::any::type_name::<Self>()`. The relay derives the publish topic from
/// this path via [`event_topic`].
pub trait DomainEvent: fmt::Debug + Send + Sync + 'static {
    /// Fully-qualified type path of the event, `::`-separated.
    fn type_path(&self) -> &'static str;

    /// Upcast for subscriber-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Derive the dotted publish topic from an event's type path.
///
/// Path separators become dots and a conventional trailing `Event`
/// segment or suffix is stripped: `billing::InvoicePaidEvent` publishes as
/// `billing.InvoicePaid`, while `billing::Refunded` is left unchanged.
pub fn event_topic(type_path: &str) -> String {
    let dotted = type_path.replace("::", ".");
    match dotted.strip_suffix("Event") {
        Some(stripped) => stripped.trim_end_matches('.').to_string(),
        None => dotted,
    }
}

/// Envelope placed on the relay bus: the derived topic plus the event.
#[derive(Clone, Debug)]
pub struct PublishedEvent {
    pub topic: String,
    pub event: Arc<dyn DomainEvent>,
}
