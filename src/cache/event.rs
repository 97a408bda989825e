//! Cache event notification.
//!
//! Handlers are registered per [`EventKind`] and identified by the
//! [`SubscriptionId`] returned at registration, which is also how they are
//! removed again.

use rustc_hash::FxHashMap;

use super::Attributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CacheAdded,
    CacheRemoved,
}

/// Opaque handle returned by [`SnippetCache::on`](super::SnippetCache::on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Entry metadata delivered to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent<'a> {
    Added {
        key: &'a Attributes,
        value: &'a str,
        ttl: u64,
        contexts: Option<&'a Attributes>,
    },
    Removed {
        generated_key: &'a str,
        value: &'a str,
        ttl: u64,
    },
}

impl CacheEvent<'_> {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Added { .. } => EventKind::CacheAdded,
            Self::Removed { .. } => EventKind::CacheRemoved,
        }
    }
}

pub type Handler = Box<dyn FnMut(&CacheEvent<'_>) + Send>;

/// Handler registry.
#[derive(Default)]
pub(super) struct Subscribers {
    next_id: u64,
    handlers: FxHashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
}

impl Subscribers {
    pub fn subscribe(&mut self, kind: EventKind, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    /// Returns false if no such subscription exists for `kind`.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(handlers) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        handlers.len() < before
    }

    /// Call every handler for the event's kind, in registration order.
    pub fn dispatch(&mut self, event: &CacheEvent<'_>) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, Handler) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let handler: Handler = Box::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, handler)
    }

    fn removed() -> CacheEvent<'static> {
        CacheEvent::Removed {
            generated_key: "_cache_a_1",
            value: "v",
            ttl: 1,
        }
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut subs = Subscribers::default();
        let (added, on_added) = counter();
        let (gone, on_removed) = counter();
        subs.subscribe(EventKind::CacheAdded, on_added);
        subs.subscribe(EventKind::CacheRemoved, on_removed);

        subs.dispatch(&removed());

        assert_eq!(added.load(Ordering::SeqCst), 0);
        assert_eq!(gone.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_by_id() {
        let mut subs = Subscribers::default();
        let (count, handler) = counter();
        let id = subs.subscribe(EventKind::CacheRemoved, handler);

        assert!(!subs.unsubscribe(EventKind::CacheAdded, id));
        assert!(subs.unsubscribe(EventKind::CacheRemoved, id));
        assert!(!subs.unsubscribe(EventKind::CacheRemoved, id));

        subs.dispatch(&removed());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(subs.count(EventKind::CacheRemoved), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut subs = Subscribers::default();
        let a = subs.subscribe(EventKind::CacheAdded, Box::new(|_| {}));
        let b = subs.subscribe(EventKind::CacheAdded, Box::new(|_| {}));
        assert_ne!(a, b);
    }
}
