//! Location resolution: which route answers a browser location.
//!
//! A location such as `/greet/bob?x=1` is tried as a whole first; trailing
//! segments are then moved one at a time into the parameter list until a
//! route whose template accepts them is found:
//!
//! ```text
//! greet/bob  + []       -> no plain route "greet/bob"
//! greet      + [bob]    -> "greet" (required parameter) matches
//! ```

use serde::Serialize;

use super::RouteRegistry;
use crate::core::{LayoutId, NavigationTarget, RoutePath};

/// Result of resolving a location against a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationResolution {
    /// Normalized location that was resolved.
    pub location: RoutePath,
    /// Registered route path that matched.
    pub path: RoutePath,
    /// Target bound to `path`.
    pub target: NavigationTarget,
    /// Trailing segments passed as parameters.
    pub segments: Vec<String>,
    /// Parent layout chain of `(path, target)`.
    pub layouts: Vec<LayoutId>,
}

/// Resolve a raw browser location against `registry`.
///
/// Returns `None` when no registered route prefix accepts the remaining
/// segments.
pub fn resolve_location<R>(registry: &R, location: &str) -> Option<NavigationResolution>
where
    R: RouteRegistry + ?Sized,
{
    let location = RoutePath::from_location(location);

    for depth in (0..=location.depth()).rev() {
        let (path, segments) = location.split_at(depth);
        let params: Vec<&str> = segments.iter().map(String::as_str).collect();

        if let Some((target, layouts)) =
            registry.navigation_route_with_segments(path.as_str(), &params)
        {
            return Some(NavigationResolution {
                location,
                path,
                target,
                segments,
                layouts,
            });
        }
    }

    None
}
