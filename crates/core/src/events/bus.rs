use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use super::types::DirectoryEvent;

/// In-process event bus backed by `tokio::broadcast`.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<DirectoryEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Publish an event to all current subscribers and return how many
    /// received it. Nobody listening is not an error.
    pub fn publish(&self, event: DirectoryEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("No event subscribers; event dropped");
                0
            }
        }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::{BackfillSummary, SlugUpdate};
    use crate::location::model::LocationType;

    fn update() -> DirectoryEvent {
        DirectoryEvent::slug_updated(SlugUpdate {
            location_type: LocationType::Country,
            location_id: "e1".into(),
            canonical_slug: "/foster-agency/england".into(),
        })
    }

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(update()), 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, DirectoryEvent::CanonicalSlugUpdated(_)));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(DirectoryEvent::backfill_completed(BackfillSummary { updated: 2, failed: 0 }));

        assert!(matches!(rx1.recv().await.unwrap(), DirectoryEvent::BackfillCompleted(_)));
        assert!(matches!(rx2.recv().await.unwrap(), DirectoryEvent::BackfillCompleted(_)));
    }

    #[test]
    fn publishing_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.publish(update()), 0);
    }
}
