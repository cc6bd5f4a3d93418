//! Drop-tile event fan-out
//!
//! An explicit publish/subscribe bus owned by the arena and handed to both
//! the map controller (publisher) and the tiles (subscribers); nothing here
//! is process-global. Delivery is synchronous and single-threaded, so the
//! bus uses `Rc<RefCell<...>>` handles rather than any locking.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::ring::TileIndex;

/// Payload of a shrink event: the tile indices dropped this round
pub type DropPayload = Vec<TileIndex>;

/// Handle identifying a registration, for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Receiver of drop-tile events
pub trait DropListener {
    /// Called once per `raise`, synchronously, before `raise` returns.
    ///
    /// The bus is passed back in so a listener may unregister itself while
    /// being notified (e.g. on its final drop).
    fn on_event_raised(&mut self, bus: &EventBus, payload: &DropPayload);
}

struct Entry {
    id: ListenerId,
    listener: Rc<RefCell<dyn DropListener>>,
}

/// Ordered listener registry for drop-tile events
#[derive(Default)]
pub struct EventBus {
    listeners: RefCell<Vec<Entry>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently registered listeners
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }

    /// Add a listener. Idempotent: registering the same handle again returns
    /// the existing id without duplicating delivery.
    pub fn register(&self, listener: Rc<RefCell<dyn DropListener>>) -> ListenerId {
        {
            let listeners = self.listeners.borrow();
            if let Some(entry) = listeners
                .iter()
                .find(|e| Rc::ptr_eq(&e.listener, &listener))
            {
                return entry.id;
            }
        }

        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.listeners.borrow_mut().push(Entry { id, listener });
        id
    }

    /// Remove a listener. Unknown ids are a no-op, not an error.
    pub fn unregister(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|e| e.id != id);
    }

    /// Deliver `payload` to every currently registered listener.
    ///
    /// Iterates in reverse registration order and re-checks the registry
    /// between deliveries, so a listener unregistering itself mid-delivery
    /// never causes another listener to be skipped.
    pub fn raise(&self, payload: &DropPayload) {
        let mut i = self.listeners.borrow().len();
        while i > 0 {
            i -= 1;
            let listener = {
                let listeners = self.listeners.borrow();
                if i >= listeners.len() {
                    i = listeners.len();
                    continue;
                }
                Rc::clone(&listeners[i].listener)
            };
            listener.borrow_mut().on_event_raised(self, payload);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        received: Vec<DropPayload>,
    }

    impl Recorder {
        fn new() -> Rc<RefCell<Self>> {
            Rc::new(RefCell::new(Self {
                received: Vec::new(),
            }))
        }
    }

    impl DropListener for Recorder {
        fn on_event_raised(&mut self, _bus: &EventBus, payload: &DropPayload) {
            self.received.push(payload.clone());
        }
    }

    #[test]
    fn test_fan_out_completeness() {
        let bus = EventBus::new();
        let listeners: Vec<_> = (0..5).map(|_| Recorder::new()).collect();
        for l in &listeners {
            bus.register(l.clone());
        }

        let payload: DropPayload = vec![3, 1, 4];
        bus.raise(&payload);

        for l in &listeners {
            let l = l.borrow();
            assert_eq!(l.received.len(), 1);
            assert_eq!(l.received[0], payload);
        }
    }

    #[test]
    fn test_register_is_idempotent() {
        let bus = EventBus::new();
        let listener = Recorder::new();
        let id1 = bus.register(listener.clone());
        let id2 = bus.register(listener.clone());
        assert_eq!(id1, id2);
        assert_eq!(bus.len(), 1);

        bus.raise(&vec![0]);
        assert_eq!(listener.borrow().received.len(), 1);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let bus = EventBus::new();
        let id = bus.register(Recorder::new());
        bus.unregister(id);
        bus.unregister(id);
        assert!(bus.is_empty());
    }

    struct OneShot {
        id: Option<ListenerId>,
        hits: usize,
    }

    impl DropListener for OneShot {
        fn on_event_raised(&mut self, bus: &EventBus, _payload: &DropPayload) {
            self.hits += 1;
            if let Some(id) = self.id {
                bus.unregister(id);
            }
        }
    }

    #[test]
    fn test_self_unregister_during_delivery_skips_nobody() {
        let bus = EventBus::new();

        let first = Recorder::new();
        bus.register(first.clone());

        let one_shot = Rc::new(RefCell::new(OneShot { id: None, hits: 0 }));
        let id = bus.register(one_shot.clone());
        one_shot.borrow_mut().id = Some(id);

        let last = Recorder::new();
        bus.register(last.clone());

        bus.raise(&vec![7]);

        assert_eq!(one_shot.borrow().hits, 1);
        assert_eq!(first.borrow().received.len(), 1);
        assert_eq!(last.borrow().received.len(), 1);
        assert_eq!(bus.len(), 2);

        // Second raise no longer reaches the unregistered listener
        bus.raise(&vec![8]);
        assert_eq!(one_shot.borrow().hits, 1);
        assert_eq!(first.borrow().received.len(), 2);
    }
}
