use log::debug;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 64;

/// Messages exchanged between the outline navigator and the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    /// Published after every card visibility pass
    FiltersChanged {
        has_results: bool,
        visible_count: usize,
    },
    /// Request to reset the navigator's own filter selection
    ClearFilters,
}

/// Typed channel owned by the page composition root
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NavigatorEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigatorEvent> {
        self.sender.subscribe()
    }

    /// Sends to every current subscriber. Returns how many received it.
    pub fn publish(&self, event: NavigatorEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!("No subscribers for {event:?}");
                0
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains every event currently queued on `receiver`, skipping over lag gaps
pub fn drain(receiver: &mut broadcast::Receiver<NavigatorEvent>) -> Vec<NavigatorEvent> {
    let mut events = Vec::new();
    loop {
        match receiver.try_recv() {
            Ok(event) => events.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                debug!("Event receiver lagged, {skipped} event(s) dropped");
            }
            Err(_) => break,
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let delivered = bus.publish(NavigatorEvent::FiltersChanged {
            has_results: false,
            visible_count: 0,
        });

        assert_eq!(delivered, 2);
        assert_eq!(drain(&mut first).len(), 1);
        assert_eq!(drain(&mut second).len(), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.publish(NavigatorEvent::ClearFilters), 0);
    }

    #[test]
    fn test_drain_keeps_order() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();
        bus.publish(NavigatorEvent::ClearFilters);
        bus.publish(NavigatorEvent::FiltersChanged {
            has_results: true,
            visible_count: 3,
        });

        let events = drain(&mut receiver);
        assert_eq!(events[0], NavigatorEvent::ClearFilters);
        assert!(matches!(
            events[1],
            NavigatorEvent::FiltersChanged { visible_count: 3, .. }
        ));
        assert!(drain(&mut receiver).is_empty());
    }
}
