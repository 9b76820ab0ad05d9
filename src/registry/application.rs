//! Application-wide route registry: one per [`AppContext`].

use std::ops::Deref;
use std::sync::Arc;

use super::{AtomicRouteRegistry, ConfigureRoutes, RouteRegistry};
use crate::context::{AppContext, ContextId};
use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
use crate::debug;
use crate::route::{RouteConfiguration, RouteData, RouteError, RoutesChanged};

/// Route registry shared by every session of one application context.
///
/// This is the bottom of the layering stack: it has no parent and answers
/// every lookup from its own snapshot. Configure/listener methods come from
/// the wrapped [`AtomicRouteRegistry`] through `Deref`.
#[derive(Debug)]
pub struct ApplicationRouteRegistry {
    context: ContextId,
    routes: AtomicRouteRegistry,
}

impl ApplicationRouteRegistry {
    /// Get the registry of `context`, creating it on first access.
    ///
    /// Concurrent first callers observe the same instance.
    pub fn instance(context: &AppContext) -> Arc<Self> {
        context.attributes().get_or_insert_with(|| {
            debug!("routes"; "created application registry for context {}", context.id());
            Self::new(context.id())
        })
    }

    fn new(context: ContextId) -> Self {
        Self {
            context,
            routes: AtomicRouteRegistry::new(format!("application#{context}")),
        }
    }

    /// Context this registry belongs to.
    pub fn context_id(&self) -> ContextId {
        self.context
    }
}

impl Deref for ApplicationRouteRegistry {
    type Target = AtomicRouteRegistry;

    fn deref(&self) -> &Self::Target {
        &self.routes
    }
}

impl ConfigureRoutes for ApplicationRouteRegistry {
    fn configure<F>(&self, mutate: F) -> Result<RoutesChanged, RouteError>
    where
        F: FnOnce(&mut RouteConfiguration) -> Result<(), RouteError>,
    {
        self.routes.configure(mutate)
    }
}

impl RouteRegistry for ApplicationRouteRegistry {
    fn registered_routes(&self) -> Vec<RouteData> {
        self.routes.registered_routes()
    }

    fn navigation_target(&self, path: &str) -> Option<NavigationTarget> {
        self.routes.navigation_target(path)
    }

    fn navigation_target_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<NavigationTarget> {
        self.routes.navigation_target_with_segments(path, segments)
    }

    fn navigation_route_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<(NavigationTarget, Vec<LayoutId>)> {
        self.routes.navigation_route_with_segments(path, segments)
    }

    fn target_url(&self, target: &NavigationTarget) -> Option<RoutePath> {
        self.routes.target_url(target)
    }

    fn target_url_with_segments(
        &self,
        target: &NavigationTarget,
        segments: &[&str],
    ) -> Option<RoutePath> {
        self.routes.target_url_with_segments(target, segments)
    }

    fn route_layouts(&self, path: &str, target: &NavigationTarget) -> Vec<LayoutId> {
        self.routes.route_layouts(path, target)
    }

    fn set_route_with_parameter(
        &self,
        path: &str,
        target: NavigationTarget,
        parameter: UrlParameter,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        self.routes
            .set_route_with_parameter(path, target, parameter, layouts)
    }

    fn remove_target(&self, target: &NavigationTarget) -> usize {
        self.routes.remove_target(target)
    }

    fn remove_path(&self, path: &str) -> Result<bool, RouteError> {
        self.routes.remove_path(path)
    }
}
