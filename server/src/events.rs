//! Reindex event bus.
//!
//! Handlers publish a [`CatalogEvent`] after every catalog write. Whatever
//! keeps a derived copy of the catalog subscribes; publishing with nobody
//! listening is fine.

use larder_core::CatalogEvent;
use tokio::sync::broadcast::{self, error::RecvError};

#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CatalogEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: CatalogEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(
                dish_id = event.dish_id,
                kind = event.kind.as_str(),
                receivers,
                "Published catalog event"
            ),
            Err(_) => tracing::debug!(
                dish_id = event.dish_id,
                kind = event.kind.as_str(),
                "No subscribers for catalog event"
            ),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.sender.subscribe()
    }
}

/// Log every reindex request until the bus closes.
///
/// Stands in for an external indexer: it sees exactly what an indexer would.
pub async fn log_reindex_requests(mut receiver: broadcast::Receiver<CatalogEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => tracing::info!(
                dish_id = event.dish_id,
                kind = event.kind.as_str(),
                "Reindex requested"
            ),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Reindex listener lagged, events dropped")
            }
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::CatalogEventKind;

    #[tokio::test]
    async fn test_subscribers_see_events_in_order() {
        let bus = EventBus::new(8);
        let mut receiver = bus.subscribe();

        bus.publish(CatalogEvent::created(1));
        bus.publish(CatalogEvent::updated(1));
        bus.publish(CatalogEvent::deleted(1));

        let kinds = [
            receiver.recv().await.unwrap().kind,
            receiver.recv().await.unwrap().kind,
            receiver.recv().await.unwrap().kind,
        ];
        assert_eq!(
            kinds,
            [
                CatalogEventKind::Created,
                CatalogEventKind::Updated,
                CatalogEventKind::Deleted
            ]
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_ok() {
        let bus = EventBus::new(1);
        bus.publish(CatalogEvent::created(42));
    }

    #[tokio::test]
    async fn test_listener_stops_when_bus_closes() {
        let bus = EventBus::new(4);
        let listener = tokio::spawn(log_reindex_requests(bus.subscribe()));

        bus.publish(CatalogEvent::updated(7));
        drop(bus);

        listener.await.unwrap();
    }
}
