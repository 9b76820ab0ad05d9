//! "Routes changed" listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::route::RoutesChanged;

type Listener = Arc<dyn Fn(&RoutesChanged) + Send + Sync>;

#[derive(Default)]
struct ListenerSet {
    next_id: AtomicU64,
    entries: RwLock<Vec<(u64, Listener)>>,
}

/// Listeners of one scope, called after every commit that changed a path.
#[derive(Default)]
pub(crate) struct RouteListeners(Arc<ListenerSet>);

impl RouteListeners {
    pub fn add<F>(&self, listener: F) -> ListenerRegistration
    where
        F: Fn(&RoutesChanged) + Send + Sync + 'static,
    {
        let id = self.0.next_id.fetch_add(1, Ordering::Relaxed);
        self.0.entries.write().push((id, Arc::new(listener)));
        ListenerRegistration {
            id,
            set: Arc::downgrade(&self.0),
        }
    }

    /// Call every listener. The list lock is not held during the calls, so a
    /// listener may add or remove listeners.
    pub fn notify(&self, changes: &RoutesChanged) {
        let listeners: Vec<Listener> = self
            .0
            .entries
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(changes);
        }
    }

    pub fn len(&self) -> usize {
        self.0.entries.read().len()
    }
}

impl std::fmt::Debug for RouteListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteListeners")
            .field("len", &self.len())
            .finish()
    }
}

/// Handle returned when a listener is added; call [`remove`](Self::remove) to detach it.
///
/// Dropping the handle keeps the listener attached.
#[derive(Debug)]
pub struct ListenerRegistration {
    id: u64,
    set: Weak<ListenerSet>,
}

impl ListenerRegistration {
    /// Detach the listener. Returns `false` if it was already gone.
    pub fn remove(self) -> bool {
        let Some(set) = self.set.upgrade() else {
            return false;
        };
        let mut entries = set.entries.write();
        let before = entries.len();
        entries.retain(|(id, _)| *id != self.id);
        entries.len() != before
    }
}
