//! Single-scope route registry with atomic snapshot publication.
//!
//! Uses `arc-swap` for lock-free reads and atomic table replacement.
//!
//! # Concurrency
//!
//! * Readers load the current `Arc<RouteConfiguration>` and resolve against
//!   that immutable value. They never take a lock and never observe a
//!   half-applied batch.
//! * Writers take the scope's writer lock, clone the current snapshot, apply
//!   their batch and store the clone. Two writers never build on the same
//!   base, so no update is lost.
//! * A failed batch publishes nothing.
//! * Listeners run after the writer lock is released.

use std::convert::Infallible;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use super::listeners::{ListenerRegistration, RouteListeners};
use super::{ConfigureRoutes, RouteRegistry};
use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
use crate::debug;
use crate::route::{RouteConfiguration, RouteData, RouteError, RoutesChanged};

/// Routing tables of one scope.
#[derive(Debug)]
pub struct AtomicRouteRegistry {
    /// Scope label used in log output (e.g. `application#1`).
    scope: Arc<str>,
    /// Committed snapshot.
    snapshot: ArcSwap<RouteConfiguration>,
    /// Revision of the committed snapshot. Also serializes writers; readers
    /// never touch it.
    write_lock: Mutex<u64>,
    listeners: RouteListeners,
}

impl AtomicRouteRegistry {
    pub fn new(scope: impl Into<Arc<str>>) -> Self {
        Self {
            scope: scope.into(),
            snapshot: ArcSwap::from_pointee(RouteConfiguration::new()),
            write_lock: Mutex::new(0),
            listeners: RouteListeners::default(),
        }
    }

    /// Scope label.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Current committed snapshot.
    #[inline]
    pub fn snapshot(&self) -> Arc<RouteConfiguration> {
        self.snapshot.load_full()
    }

    /// Register a listener called after each commit that changed at least one path.
    ///
    /// Listeners run on the committing thread after the writer lock is
    /// released, so events of two racing commits may arrive out of commit
    /// order. [`RoutesChanged::revision`] gives the commit order.
    pub fn add_routes_changed_listener<F>(&self, listener: F) -> ListenerRegistration
    where
        F: Fn(&RoutesChanged) + Send + Sync + 'static,
    {
        self.listeners.add(listener)
    }

    /// Remove every route of this scope.
    pub fn clear(&self) -> RoutesChanged {
        let Ok(((), changes)) = self.commit(|cfg| {
            cfg.clear();
            Ok::<_, Infallible>(())
        });
        changes
    }

    /// Stage, validate and publish one batch.
    ///
    /// `mutate` runs under the writer lock against a private clone of the
    /// current snapshot. On `Err` the clone is dropped unpublished.
    pub(crate) fn commit<T, E>(
        &self,
        mutate: impl FnOnce(&mut RouteConfiguration) -> Result<T, E>,
    ) -> Result<(T, RoutesChanged), E> {
        let (value, changes) = {
            let mut revision = self.write_lock.lock();
            let current = self.snapshot.load_full();
            let mut staged = RouteConfiguration::clone(&current);

            let value = mutate(&mut staged)?;

            let mut changes = current.diff(&staged);
            if !changes.is_empty() {
                *revision += 1;
                changes.revision = *revision;
                self.snapshot.store(Arc::new(staged));
            }
            (value, changes)
        };

        if !changes.is_empty() {
            debug!("routes"; "{} committed r{} {}", self.scope, changes.revision, changes);
            self.listeners.notify(&changes);
        }

        Ok((value, changes))
    }
}

impl ConfigureRoutes for AtomicRouteRegistry {
    fn configure<F>(&self, mutate: F) -> Result<RoutesChanged, RouteError>
    where
        F: FnOnce(&mut RouteConfiguration) -> Result<(), RouteError>,
    {
        self.commit(mutate)
            .map(|((), changes)| changes)
            .inspect_err(|err| debug!("routes"; "{} rejected batch: {}", self.scope, err))
    }
}

impl RouteRegistry for AtomicRouteRegistry {
    fn registered_routes(&self) -> Vec<RouteData> {
        self.snapshot().routes()
    }

    fn navigation_target(&self, path: &str) -> Option<NavigationTarget> {
        self.snapshot.load().navigation_target(path)
    }

    fn navigation_target_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<NavigationTarget> {
        self.snapshot
            .load()
            .navigation_target_with_segments(path, segments)
    }

    fn navigation_route_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<(NavigationTarget, Vec<LayoutId>)> {
        self.snapshot
            .load()
            .navigation_route_with_segments(path, segments)
    }

    fn target_url(&self, target: &NavigationTarget) -> Option<RoutePath> {
        self.snapshot.load().target_url(target)
    }

    fn target_url_with_segments(
        &self,
        target: &NavigationTarget,
        segments: &[&str],
    ) -> Option<RoutePath> {
        self.snapshot
            .load()
            .target_url_with_segments(target, segments)
    }

    fn route_layouts(&self, path: &str, target: &NavigationTarget) -> Vec<LayoutId> {
        self.snapshot.load().route_layouts(path, target)
    }

    fn set_route_with_parameter(
        &self,
        path: &str,
        target: NavigationTarget,
        parameter: UrlParameter,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        self.configure(|cfg| cfg.set_route_with_parameter(path, target, parameter, layouts))
            .map(|_| ())
    }

    fn remove_target(&self, target: &NavigationTarget) -> usize {
        let Ok((removed, _)) =
            self.commit(|cfg| Ok::<_, Infallible>(cfg.remove_target(target)));
        removed
    }

    fn remove_path(&self, path: &str) -> Result<bool, RouteError> {
        self.commit(|cfg| cfg.remove_path(path))
            .map(|(removed, _)| removed)
    }
}
