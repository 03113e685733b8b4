//! Event relay: republishes domain events on the workspace bus.
//!
//! Events are published in the exact order given, one broadcast send per
//! event, each followed by an info log line. There is no batching, no
//! deduplication, and no failure isolation between events.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use crate::config::RelayConfig;
use crate::events::{event_topic, DomainEvent, PublishedEvent};

/// Fans domain events out to bus subscribers and the log.
pub struct EventRelay {
    tx: broadcast::Sender<PublishedEvent>,
}

impl EventRelay {
    /// Create a relay with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a relay from the `[relay]` configuration section.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(config.channel_capacity)
    }

    /// Subscribe to all subsequently published events.
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish all raised events, in order.
    ///
    /// Each event is published under the topic derived from its type path
    /// (see [`event_topic`]) with the event itself as payload. A send with
    /// no live subscribers is not an error.
    pub fn dispatch(&self, events: Vec<Arc<dyn DomainEvent>>) {
        for event in events {
            let topic = event_topic(event.type_path());

            let _ = self.tx.send(PublishedEvent {
                topic: topic.clone(),
                event,
            });

            info!("{} was fired.", topic);
        }
    }
}
