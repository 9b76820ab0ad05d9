//! Route data - read-side view of one registered path.

use std::sync::Arc;

use serde::Serialize;

use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};

/// One registered route, produced on demand from a committed snapshot.
///
/// The snapshot maps are the source of truth; a `RouteData` is a detached
/// value and never changes after it is built.
///
/// # Example
///
/// ```text
/// withAliases, version, person -> Person
///
/// RouteData {
///     path:              version
///     navigation_target: Person
///     route_aliases:     [withAliases, person]
///     parent_layouts:    [Middle, Main]
///     parameter:         none
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteData {
    /// Primary path of this entry.
    pub path: RoutePath,
    /// Target bound to `path`.
    pub navigation_target: NavigationTarget,
    /// The other paths bound to the same target, in registration order.
    pub route_aliases: Vec<RoutePath>,
    /// Parent layouts, innermost first.
    pub parent_layouts: Arc<[LayoutId]>,
    /// Parameter template of `path`.
    pub parameter: UrlParameter,
}

impl RouteData {
    /// Check if `path` is this route's path or one of its aliases.
    pub fn answers_to(&self, path: &str) -> bool {
        self.path == path || self.route_aliases.iter().any(|alias| alias == path)
    }

    /// Check if this route accepts trailing parameter segments.
    #[inline]
    pub fn is_parameterized(&self) -> bool {
        self.parameter != UrlParameter::None
    }
}
