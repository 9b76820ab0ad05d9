//! Route registries - layered, snapshot-based routing tables.
//!
//! # Architecture
//!
//! ```text
//! SessionRouteRegistry (one per session)
//! ├── local: AtomicRouteRegistry        <- session edits land here
//! └── parent: Arc<dyn RouteRegistry>    <- ApplicationRouteRegistry
//!
//! ApplicationRouteRegistry (one per AppContext)
//! └── AtomicRouteRegistry
//! ```
//!
//! Every scope publishes an immutable [`RouteConfiguration`] snapshot through
//! `arc-swap`. Readers load the current snapshot and never block; writers
//! serialize on a per-scope lock, mutate a staged clone and swap it in.
//!
//! # Module Structure
//!
//! - [`atomic`]: single-scope engine (snapshot, configure, listeners)
//! - [`application`]: per-context singleton scope
//! - [`session`]: per-session overlay over the application scope
//! - [`resolve`]: location -> (route, parameter segments) resolution
//!
//! # Usage
//!
//! ```ignore
//! let context = Arc::new(AppContext::new());
//! let global = ApplicationRouteRegistry::instance(&context);
//! global.set_route("home", NavigationTarget::new("Home"), &[])?;
//!
//! let session = Session::new(Arc::clone(&context));
//! let routes = SessionRouteRegistry::for_session(&session)?;
//! routes.set_route("home", NavigationTarget::new("Beta"), &[])?; // shadows global
//! ```

mod application;
mod atomic;
mod listeners;
mod resolve;
mod session;


pub use application::ApplicationRouteRegistry;
pub use atomic::AtomicRouteRegistry;
pub use listeners::ListenerRegistration;
pub use resolve::{NavigationResolution, resolve_location};
pub use session::SessionRouteRegistry;

use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
use crate::route::{RouteConfiguration, RouteData, RouteError, RoutesChanged};

/// One routing scope: lookup, mutation and listing.
///
/// Object safe, so an overlay can hold its parent as `Arc<dyn RouteRegistry>`.
pub trait RouteRegistry: Send + Sync {
    /// All routes visible from this scope.
    fn registered_routes(&self) -> Vec<RouteData>;

    /// Target bound to `path`, regardless of its parameter template.
    fn navigation_target(&self, path: &str) -> Option<NavigationTarget>;

    /// Target bound to `path` whose template accepts `segments`.
    fn navigation_target_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<NavigationTarget>;

    /// Target bound to `path` whose template accepts `segments`, together
    /// with that binding's parent layout chain.
    ///
    /// Both halves come from one snapshot of one scope.
    fn navigation_route_with_segments(
        &self,
        path: &str,
        segments: &[&str],
    ) -> Option<(NavigationTarget, Vec<LayoutId>)>;

    /// Primary path of `target`.
    fn target_url(&self, target: &NavigationTarget) -> Option<RoutePath>;

    /// URL of `target` with parameter values appended.
    fn target_url_with_segments(
        &self,
        target: &NavigationTarget,
        segments: &[&str],
    ) -> Option<RoutePath>;

    /// Parent layout chain of the `(path, target)` pair, empty if none.
    fn route_layouts(&self, path: &str, target: &NavigationTarget) -> Vec<LayoutId>;

    /// Bind `path` to `target` in this scope.
    fn set_route(
        &self,
        path: &str,
        target: NavigationTarget,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        self.set_route_with_parameter(path, target, UrlParameter::None, layouts)
    }

    /// Bind `path` to a parameterized `target` in this scope.
    fn set_route_with_parameter(
        &self,
        path: &str,
        target: NavigationTarget,
        parameter: UrlParameter,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError>;

    /// Unbind every path of `target` in this scope. Returns the number removed.
    fn remove_target(&self, target: &NavigationTarget) -> usize;

    /// Unbind one path in this scope. Returns `true` if it was bound.
    fn remove_path(&self, path: &str) -> Result<bool, RouteError>;
}

/// Batch mutation of one scope, committed atomically.
pub trait ConfigureRoutes {
    /// Apply `mutate` to a staged copy of this scope and publish it.
    ///
    /// If `mutate` fails nothing is published and the error is returned.
    fn configure<F>(&self, mutate: F) -> Result<RoutesChanged, RouteError>
    where
        F: FnOnce(&mut RouteConfiguration) -> Result<(), RouteError>;
}
