//! Session-scoped route registry layered over the application registry.
//!
//! Session-local bindings shadow application bindings of the same path for
//! every lookup and for the merged listing. Neither table is modified by
//! the overlay; mutation only ever reaches the local scope.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::{
    ApplicationRouteRegistry, AtomicRouteRegistry, ConfigureRoutes, ListenerRegistration,
    RouteRegistry,
};
use crate::context::{Session, SessionId};
use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
use crate::route::{RouteConfiguration, RouteData, RouteError, RoutesChanged};
use crate::{debug, log};

/// Route registry of one user session.
pub struct SessionRouteRegistry {
    session: SessionId,
    local: AtomicRouteRegistry,
    /// Fallback scope. `None` only for detached registries in isolated tests.
    parent: Option<Arc<dyn RouteRegistry>>,
}

impl SessionRouteRegistry {
    /// Get the registry attached to `session`, creating it on first access.
    ///
    /// The new registry falls back to the application registry of the
    /// session's context. Fails with [`RouteError::IllegalState`] if the
    /// attached registry was created for another session.
    pub fn for_session(session: &Session) -> Result<Arc<Self>, RouteError> {
        let registry = session.attributes().get_or_insert_with(|| {
            debug!("session"; "created route registry for session {}", session.id());
            let parent: Arc<dyn RouteRegistry> =
                ApplicationRouteRegistry::instance(session.context());
            Self::new(session.id(), parent)
        });

        if registry.session != session.id() {
            log!("error"; "session {} holds the route registry of session {}",
                session.id(), registry.session);
            return Err(RouteError::IllegalState(format!(
                "session {} has as its attribute a route registry of session {}",
                session.id(),
                registry.session
            )));
        }
        Ok(registry)
    }

    /// Create a registry for `session` falling back to `parent`.
    pub fn new(session: SessionId, parent: Arc<dyn RouteRegistry>) -> Self {
        Self {
            session,
            local: AtomicRouteRegistry::new(format!("session#{session}")),
            parent: Some(parent),
        }
    }

    /// Create a registry without a parent scope.
    ///
    /// Only local routes are visible. Meant for isolated tests.
    pub fn detached(session: SessionId) -> Self {
        Self {
            session,
            local: AtomicRouteRegistry::new(format!("session#{session}")),
            parent: None,
        }
    }

    /// Session this registry belongs to.
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    /// Fallback scope, if any.
    pub fn parent(&self) -> Option<&Arc<dyn RouteRegistry>> {
        self.parent.as_ref()
    }

    /// Committed snapshot of the local scope only.
    pub fn local_snapshot(&self) -> Arc<RouteConfiguration> {
        self.local.snapshot()
    }

    /// Remove every session-local route. The parent scope is untouched.
    pub fn clear(&self) -> RoutesChanged {
        self.local.clear()
    }

    /// Listen to commits of the local scope.
    ///
    /// Same delivery rules as [`AtomicRouteRegistry::add_routes_changed_listener`].
    pub fn add_routes_changed_listener<F>(&self, listener: F) -> ListenerRegistration
    where
        F: Fn(&RoutesChanged) + Send + Sync + 'static,
    {
        self.local.add_routes_changed_listener(listener)
    }
}

impl std::fmt::Debug for SessionRouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRouteRegistry")
            .field("session", &self.session)
            .field("local", &self.local)
            .field("detached", &self.parent.is_none())
            .finish()
    }
}

impl ConfigureRoutes for SessionRouteRegistry {
    fn configure<F>(&self, mutate: F) -> Result<RoutesChanged, RouteError>
    where
        F: FnOnce(&mut RouteConfiguration) -> Result<(), RouteError>,
    {
        self.local.configure(mutate)
    }
}

impl RouteRegistry for SessionRouteRegistry {
    /// Local routes first, then every parent route whose path is not shadowed.
    fn registered_routes(&self) -> Vec<RouteData> {
        let mut routes = self.local.registered_routes();

        let Some(parent) = &self.parent else {
            return routes;
        };
        let inherited = parent.registered_routes();
        if inherited.is_empty() {
            return routes;
        }

        let shadowed: FxHashSet<RoutePath> = routes.iter().map(|r| r.path.clone()).collect();
        routes.extend(
            inherited
                .into_iter()
                .filter(|route| !shadowed.contains(&route.path)),
        );
        routes
    }

    fn navigation_target(&self, path: &str) -> Option<NavigationTarget> {
        self.local
            .navigation_target(path)
            .or_else(|| self.parent.as_ref()?.navigation_target(path))
    }

    fn navigation_target_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<NavigationTarget> {
        self.local
            .navigation_target_with_segments(path, segments)
            .or_else(|| {
                self.parent
                    .as_ref()?
                    .navigation_target_with_segments(path, segments)
            })
    }

    /// The pair falls back to the parent as a whole, so a parent target is
    /// never combined with a local layout chain.
    fn navigation_route_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<(NavigationTarget, Vec<LayoutId>)> {
        self.local
            .navigation_route_with_segments(path, segments)
            .or_else(|| {
                self.parent
                    .as_ref()?
                    .navigation_route_with_segments(path, segments)
            })
    }

    fn target_url(&self, target: &NavigationTarget) -> Option<RoutePath> {
        self.local
            .target_url(target)
            .or_else(|| self.parent.as_ref()?.target_url(target))
    }

    fn target_url_with_segments(
        &self,
        target: &NavigationTarget,
        segments: &[&str],
    ) -> Option<RoutePath> {
        self.local
            .target_url_with_segments(target, segments)
            .or_else(|| {
                self.parent
                    .as_ref()?
                    .target_url_with_segments(target, segments)
            })
    }

    /// Presence is path-keyed: a local binding of `path` answers even when
    /// it belongs to another target (the result is then empty).
    fn route_layouts(&self, path: &str, target: &NavigationTarget) -> Vec<LayoutId> {
        let local = self.local.snapshot();
        if local.has_route(path) {
            return local.route_layouts(path, target);
        }
        match &self.parent {
            Some(parent) => parent.route_layouts(path, target),
            None => Vec::new(),
        }
    }

    fn set_route_with_parameter(
        &self,
        path: &str,
        target: NavigationTarget,
        parameter: UrlParameter,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        self.local
            .set_route_with_parameter(path, target, parameter, layouts)
    }

    fn remove_target(&self, target: &NavigationTarget) -> usize {
        self.local.remove_target(target)
    }

    fn remove_path(&self, path: &str) -> Result<bool, RouteError> {
        self.local.remove_path(path)
    }
}
