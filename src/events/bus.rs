//! Event queue owned by the facade.
//!
//! Platform callbacks hold an [`EventPublisher`] (usually through
//! [`super::global::publish`]); the facade pops events with
//! [`EventBus::try_recv`] on the UI thread until the queue is empty.

use std::sync::mpsc::{self, Receiver, Sender};

use super::types::OverlayEvent;

pub struct EventBus {
    tx: Sender<OverlayEvent>,
    rx: Receiver<OverlayEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher(self.tx.clone())
    }

    /// Next queued event, never blocking. The bus keeps its own sender, so
    /// `None` only ever means "empty".
    pub fn try_recv(&self) -> Option<OverlayEvent> {
        self.rx.try_recv().ok()
    }
}

/// Sending half handed to callbacks. Publishing after the bus is gone is a
/// no-op.
#[derive(Clone)]
pub struct EventPublisher(Sender<OverlayEvent>);

impl EventPublisher {
    pub fn publish(&self, event: OverlayEvent) {
        if self.0.send(event).is_err() {
            tracing::trace!("event bus closed, event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attach::RetryToken;
    use crate::model::Point;

    fn pending(bus: &EventBus) -> Vec<OverlayEvent> {
        std::iter::from_fn(|| bus.try_recv()).collect()
    }

    #[test]
    fn test_events_arrive_in_publish_order() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        publisher.publish(OverlayEvent::DragBegan);
        publisher.publish(OverlayEvent::DragEnded {
            translation: Point::new(12.0, 0.0),
        });

        assert_eq!(
            pending(&bus),
            vec![
                OverlayEvent::DragBegan,
                OverlayEvent::DragEnded {
                    translation: Point::new(12.0, 0.0)
                },
            ]
        );
        assert_eq!(bus.try_recv(), None);
    }

    #[test]
    fn test_cloned_publishers_share_the_queue() {
        let bus = EventBus::new();
        let a = bus.publisher();
        let b = a.clone();
        b.publish(OverlayEvent::RetryElapsed(RetryToken(2)));
        a.publish(OverlayEvent::Tapped);
        assert_eq!(
            pending(&bus),
            vec![OverlayEvent::RetryElapsed(RetryToken(2)), OverlayEvent::Tapped]
        );
    }

    #[test]
    fn test_publish_after_bus_dropped_is_silent() {
        let publisher = EventBus::new().publisher();
        publisher.publish(OverlayEvent::Tapped);
    }

    #[test]
    fn test_publish_from_another_thread() {
        let bus = EventBus::new();
        let publisher = bus.publisher();
        std::thread::spawn(move || publisher.publish(OverlayEvent::HostWindowChanged))
            .join()
            .unwrap();
        assert_eq!(bus.try_recv(), Some(OverlayEvent::HostWindowChanged));
    }
}
