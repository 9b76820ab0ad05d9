//! Type-keyed attribute slots.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

type Slot = Arc<dyn Any + Send + Sync>;

/// Attribute store keyed by the value's own type.
///
/// Holds at most one value per type. Creation through
/// [`get_or_insert_with`](Self::get_or_insert_with) is atomic: concurrent
/// first callers all receive the same instance.
#[derive(Default)]
pub struct Attributes {
    slots: DashMap<TypeId, Slot, FxBuildHasher>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of type `T`, if present.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let slot = self.slots.get(&TypeId::of::<T>())?.value().clone();
        slot.downcast::<T>().ok()
    }

    /// Get the value of type `T`, creating it with `init` on first access.
    ///
    /// `init` runs at most once per store while the slot is locked; it must
    /// not touch this same store.
    pub fn get_or_insert_with<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let slot = self
            .slots
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(init()) as Slot)
            .value()
            .clone();

        match slot.downcast::<T>() {
            Ok(value) => value,
            Err(_) => unreachable!("attribute slot keyed by TypeId holds a foreign type"),
        }
    }

    /// Store `value`, returning the previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&self, value: Arc<T>) -> Option<Arc<T>> {
        self.slots
            .insert(TypeId::of::<T>(), value)
            .and_then(|old| old.downcast::<T>().ok())
    }

    /// Remove and return the value of type `T`.
    pub fn remove<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.slots
            .remove(&TypeId::of::<T>())
            .and_then(|(_, old)| old.downcast::<T>().ok())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attributes")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Counter(usize);

    #[test]
    fn test_get_or_insert_once() {
        let attrs = Attributes::new();
        let a = attrs.get_or_insert_with(|| Counter(1));
        let b = attrs.get_or_insert_with(|| Counter(2));

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*b, Counter(1));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_get_insert_remove() {
        let attrs = Attributes::new();
        assert!(attrs.get::<Counter>().is_none());

        assert!(attrs.insert(Arc::new(Counter(3))).is_none());
        assert_eq!(*attrs.get::<Counter>().unwrap(), Counter(3));

        let old = attrs.insert(Arc::new(Counter(4))).unwrap();
        assert_eq!(*old, Counter(3));

        assert_eq!(*attrs.remove::<Counter>().unwrap(), Counter(4));
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_types_do_not_collide() {
        let attrs = Attributes::new();
        attrs.insert(Arc::new(Counter(1)));
        attrs.insert(Arc::new(String::from("x")));

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get::<String>().unwrap().as_str(), "x");
    }

    #[test]
    fn test_concurrent_first_access_creates_one() {
        let attrs = Attributes::new();
        let created = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        let values: Vec<Arc<Counter>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        attrs.get_or_insert_with(|| {
                            created.fetch_add(1, Ordering::SeqCst);
                            Counter(0)
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
