//! Route configuration - one scope's routing tables.
//!
//! A [`RouteConfiguration`] is both the committed snapshot that readers see
//! and the staging copy a writer mutates inside `configure`. Committed values
//! are never mutated again; a writer always works on a clone.
//!
//! # Tables
//!
//! ```text
//! routes:  path   -> { target, parameter, layouts }   (sorted by path)
//! targets: target -> [path, ...]                      (registration order)
//! ```
//!
//! The two tables are mutual inverses: every path in `routes` appears in
//! exactly one target's list, and every listed path is a key of `routes`.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{RouteData, RouteError, RoutesChanged};
use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};

/// Paths bound to one target, oldest first. Most targets have one or two.
type TargetPaths = SmallVec<[RoutePath; 2]>;

/// Binding stored for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RouteEntry {
    pub target: NavigationTarget,
    pub parameter: UrlParameter,
    pub layouts: Arc<[LayoutId]>,
}

/// Routing tables of one scope.
#[derive(Debug, Clone, Default)]
pub struct RouteConfiguration {
    routes: BTreeMap<RoutePath, RouteEntry>,
    targets: FxHashMap<NavigationTarget, TargetPaths>,
}

impl RouteConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Mutation (staging copy only)
    // ========================================================================

    /// Bind `path` to `target` with the given parent layout chain.
    ///
    /// Re-binding the same target is idempotent (the layout chain is replaced).
    /// Binding a path owned by another target fails with
    /// [`RouteError::DuplicateRoute`].
    pub fn set_route(
        &mut self,
        path: &str,
        target: NavigationTarget,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        self.set_route_with_parameter(path, target, UrlParameter::None, layouts)
    }

    /// Bind `path` to `target` with a parameter template.
    pub fn set_route_with_parameter(
        &mut self,
        path: &str,
        target: NavigationTarget,
        parameter: UrlParameter,
        layouts: &[LayoutId],
    ) -> Result<(), RouteError> {
        let path = RoutePath::new(path)?;
        target.validate()?;
        for layout in layouts {
            layout.validate()?;
        }

        if let Some(existing) = self.routes.get(&path)
            && existing.target != target
        {
            return Err(RouteError::DuplicateRoute {
                path,
                existing: existing.target.clone(),
                attempted: target,
            });
        }

        // Copy the caller's chain; later changes to their list must not leak in
        let entry = RouteEntry {
            target: target.clone(),
            parameter,
            layouts: Arc::from(layouts),
        };

        if self.routes.insert(path.clone(), entry).is_none() {
            self.targets.entry(target).or_default().push(path);
        }
        Ok(())
    }

    /// Replace the parent layout chain of an already bound path.
    pub fn set_parent_layouts(&mut self, path: &str, layouts: &[LayoutId]) -> Result<(), RouteError> {
        for layout in layouts {
            layout.validate()?;
        }
        let key = RoutePath::new(path)?;
        match self.routes.get_mut(&key) {
            Some(entry) => {
                entry.layouts = Arc::from(layouts);
                Ok(())
            }
            None => Err(RouteError::InvalidArgument(format!(
                "cannot set parent layouts, no route is bound to '{key}'"
            ))),
        }
    }

    /// Unbind one path. Sibling paths of the same target stay registered.
    ///
    /// Returns `true` if the path was bound.
    pub fn remove_path(&mut self, path: &str) -> Result<bool, RouteError> {
        let key = RoutePath::new(path)?;
        let Some(entry) = self.routes.remove(&key) else {
            return Ok(false);
        };

        if let Some(paths) = self.targets.get_mut(&entry.target) {
            paths.retain(|p| *p != key);
            if paths.is_empty() {
                self.targets.remove(&entry.target);
            }
        }
        Ok(true)
    }

    /// Unbind every path bound to `target`, layout chains included.
    ///
    /// Returns the number of paths removed.
    pub fn remove_target(&mut self, target: &NavigationTarget) -> usize {
        let Some(paths) = self.targets.remove(target) else {
            return 0;
        };
        for path in &paths {
            self.routes.remove(path);
        }
        paths.len()
    }

    /// Remove every route of this scope.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.targets.clear();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[inline]
    pub(crate) fn entry(&self, path: &str) -> Option<&RouteEntry> {
        self.routes.get(RoutePath::lookup_key(path))
    }

    /// Check if any target is bound to `path`.
    pub fn has_route(&self, path: &str) -> bool {
        self.entry(path).is_some()
    }

    /// Check if `path` is bound and its template accepts `segments`.
    pub fn has_route_with_segments<S: AsRef<str>>(&self, path: &str, segments: &[S]) -> bool {
        self.entry(path)
            .is_some_and(|entry| entry.parameter.accepts(segments))
    }

    /// Target bound to `path`, regardless of its parameter template.
    pub fn navigation_target(&self, path: &str) -> Option<NavigationTarget> {
        self.entry(path).map(|entry| entry.target.clone())
    }

    /// Target bound to `path` whose template accepts `segments`.
    pub fn navigation_target_with_segments<S: AsRef<str>>(
        &self,
        path: &str,
        segments: &[S],
    ) -> Option<NavigationTarget> {
        self.entry(path)
            .filter(|entry| entry.parameter.accepts(segments))
            .map(|entry| entry.target.clone())
    }

    /// Like [`navigation_target_with_segments`](Self::navigation_target_with_segments),
    /// also returning the binding's layout chain.
    pub fn navigation_route_with_segments<S: AsRef<str>>(
        &self,
        path: &str,
        segments: &[S],
    ) -> Option<(NavigationTarget, Vec<LayoutId>)> {
        self.entry(path)
            .filter(|entry| entry.parameter.accepts(segments))
            .map(|entry| (entry.target.clone(), entry.layouts.to_vec()))
    }

    /// Primary path of `target`: the oldest of its registered paths.
    pub fn target_url(&self, target: &NavigationTarget) -> Option<RoutePath> {
        self.targets
            .get(target)
            .and_then(|paths| paths.first())
            .cloned()
    }

    /// Concrete URL for `target` with parameter values filled in.
    ///
    /// Picks the oldest path whose template accepts `segments`.
    pub fn target_url_with_segments<S: AsRef<str>>(
        &self,
        target: &NavigationTarget,
        segments: &[S],
    ) -> Option<RoutePath> {
        self.targets.get(target)?.iter().find_map(|path| {
            let entry = self.routes.get(path)?;
            entry.parameter.accepts(segments).then(|| path.join(segments))
        })
    }

    /// Parent layout chain stored for the exact `(path, target)` pair.
    pub fn route_layouts(&self, path: &str, target: &NavigationTarget) -> Vec<LayoutId> {
        self.entry(path)
            .filter(|entry| entry.target == *target)
            .map(|entry| entry.layouts.to_vec())
            .unwrap_or_default()
    }

    /// Paths bound to `target`, oldest first.
    pub fn paths_for(&self, target: &NavigationTarget) -> Vec<RoutePath> {
        self.targets
            .get(target)
            .map(|paths| paths.to_vec())
            .unwrap_or_default()
    }

    /// Route data for one path.
    pub fn route(&self, path: &str) -> Option<RouteData> {
        let key = RoutePath::lookup_key(path);
        self.routes
            .get_key_value(key)
            .map(|(path, entry)| self.to_route_data(path, entry))
    }

    /// All routes, one per path, sorted by path.
    pub fn routes(&self) -> Vec<RouteData> {
        self.routes
            .iter()
            .map(|(path, entry)| self.to_route_data(path, entry))
            .collect()
    }

    /// Number of bound paths.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of distinct targets.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    fn to_route_data(&self, path: &RoutePath, entry: &RouteEntry) -> RouteData {
        let route_aliases = self
            .targets
            .get(&entry.target)
            .map(|paths| paths.iter().filter(|p| *p != path).cloned().collect())
            .unwrap_or_default();

        RouteData {
            path: path.clone(),
            navigation_target: entry.target.clone(),
            route_aliases,
            parent_layouts: Arc::clone(&entry.layouts),
            parameter: entry.parameter,
        }
    }

    // ========================================================================
    // Change detection
    // ========================================================================

    /// Paths that differ between this (committed) snapshot and `next`.
    pub(crate) fn diff(&self, next: &Self) -> RoutesChanged {
        let mut changes = RoutesChanged::default();

        for (path, entry) in &next.routes {
            match self.routes.get(path) {
                None => changes.added.push(path.clone()),
                Some(old) if old != entry => changes.updated.push(path.clone()),
                Some(_) => {}
            }
        }

        changes.removed = self
            .routes
            .keys()
            .filter(|path| !next.routes.contains_key(*path))
            .cloned()
            .collect();

        changes
    }

    /// Panic if `routes` and `targets` are not mutual inverses.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let listed: usize = self.targets.values().map(|paths| paths.len()).sum();
        assert_eq!(listed, self.routes.len(), "path count mismatch");

        for (target, paths) in &self.targets {
            assert!(!paths.is_empty(), "empty path list for {target}");
            for path in paths {
                let entry = self.routes.get(path).expect("listed path is bound");
                assert_eq!(&entry.target, target, "path {path} bound to another target");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str) -> NavigationTarget {
        NavigationTarget::new(name)
    }

    fn layouts(names: &[&str]) -> Vec<LayoutId> {
        names.iter().map(|n| LayoutId::new(*n)).collect()
    }

    fn with_aliases() -> RouteConfiguration {
        let mut config = RouteConfiguration::new();
        config.set_route("withAliases", target("Aliased"), &[]).unwrap();
        config.set_route("version", target("Aliased"), &[]).unwrap();
        config.set_route("person", target("Aliased"), &[]).unwrap();
        config
    }

    #[test]
    fn test_set_and_lookup() {
        let mut config = RouteConfiguration::new();
        config.set_route("home", target("Home"), &[]).unwrap();

        assert!(config.has_route("home"));
        assert!(config.has_route("/home/"));
        assert_eq!(config.navigation_target("home"), Some(target("Home")));
        assert_eq!(config.navigation_target("missing"), None);
        config.assert_consistent();
    }

    #[test]
    fn test_duplicate_path_rejected() {
        let mut config = RouteConfiguration::new();
        config.set_route("home", target("A"), &[]).unwrap();

        let err = config.set_route("home", target("B"), &[]).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(config.navigation_target("home"), Some(target("A")));
    }

    #[test]
    fn test_identical_binding_idempotent() {
        let mut config = RouteConfiguration::new();
        let chain = layouts(&["Main"]);
        config.set_route("home", target("A"), &chain).unwrap();
        config.set_route("home", target("A"), &chain).unwrap();

        assert_eq!(config.len(), 1);
        assert_eq!(config.paths_for(&target("A")).len(), 1);
        config.assert_consistent();
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        let mut config = RouteConfiguration::new();
        assert!(matches!(
            config.set_route("home", target(""), &[]),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            config.set_route("a//b", target("A"), &[]),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(matches!(
            config.set_route("home", target("A"), &layouts(&[""])),
            Err(RouteError::InvalidArgument(_))
        ));
        assert!(config.is_empty());
    }

    #[test]
    fn test_alias_symmetry() {
        let config = with_aliases();
        let routes = config.routes();
        assert_eq!(routes.len(), 3);

        for route in &routes {
            assert_eq!(route.route_aliases.len(), 2);
            assert!(!route.route_aliases.contains(&route.path));
        }
    }

    #[test]
    fn test_routes_sorted_by_path() {
        let config = with_aliases();
        let paths: Vec<_> = config.routes().into_iter().map(|r| r.path.to_string()).collect();
        assert_eq!(paths, vec!["person", "version", "withAliases"]);
    }

    #[test]
    fn test_remove_target_cascades() {
        let mut config = with_aliases();
        config.set_route("home", target("Home"), &[]).unwrap();

        assert_eq!(config.remove_target(&target("Aliased")), 3);
        assert!(!config.has_route("withAliases"));
        assert!(!config.has_route("version"));
        assert!(!config.has_route("person"));
        assert!(config.has_route("home"));
        config.assert_consistent();
    }

    #[test]
    fn test_remove_path_keeps_siblings() {
        let mut config = with_aliases();
        assert!(config.remove_path("withAliases").unwrap());
        assert!(!config.remove_path("withAliases").unwrap());

        let version = config.route("version").unwrap();
        assert_eq!(version.route_aliases, vec![RoutePath::new("person").unwrap()]);
        let person = config.route("person").unwrap();
        assert_eq!(person.route_aliases, vec![RoutePath::new("version").unwrap()]);
        config.assert_consistent();
    }

    #[test]
    fn test_target_url_prefers_oldest_path() {
        let mut config = with_aliases();
        assert_eq!(config.target_url(&target("Aliased")).unwrap(), "withAliases");

        config.remove_path("withAliases").unwrap();
        assert_eq!(config.target_url(&target("Aliased")).unwrap(), "version");
        assert_eq!(config.target_url(&target("Missing")), None);
    }

    #[test]
    fn test_layouts_for_exact_pair() {
        let mut config = RouteConfiguration::new();
        config
            .set_route("version", target("A"), &layouts(&["Middle", "Main"]))
            .unwrap();

        assert_eq!(config.route_layouts("version", &target("A")), layouts(&["Middle", "Main"]));
        assert!(config.route_layouts("version", &target("B")).is_empty());
        assert!(config.route_layouts("other", &target("A")).is_empty());
    }

    #[test]
    fn test_layout_chain_is_copied() {
        let mut chain = layouts(&["Middle", "Main"]);
        let mut config = RouteConfiguration::new();
        config.set_route("version", target("A"), &chain).unwrap();

        chain.retain(|l| l.as_str() != "Main");

        assert_eq!(config.route_layouts("version", &target("A")).len(), 2);
    }

    #[test]
    fn test_set_parent_layouts() {
        let mut config = RouteConfiguration::new();
        config.set_route("info", target("A"), &[]).unwrap();
        config.set_parent_layouts("info", &layouts(&["Main"])).unwrap();

        assert_eq!(config.route_layouts("info", &target("A")), layouts(&["Main"]));
        assert!(config.set_parent_layouts("missing", &[]).is_err());
    }

    #[test]
    fn test_parameter_matching() {
        let mut config = RouteConfiguration::new();
        config
            .set_route_with_parameter("greet", target("Greet"), UrlParameter::Required, &[])
            .unwrap();

        let none: [&str; 0] = [];
        assert!(config.navigation_target("greet").is_some());
        assert!(config.navigation_target_with_segments("greet", &["bob"]).is_some());
        assert!(config.navigation_target_with_segments("greet", &none).is_none());
        assert!(!config.has_route_with_segments("greet", &["a", "b"]));
    }

    #[test]
    fn test_navigation_route_pairs_target_and_layouts() {
        let mut config = RouteConfiguration::new();
        config
            .set_route_with_parameter("greet", target("Greet"), UrlParameter::Required, &layouts(&["Main"]))
            .unwrap();

        let none: [&str; 0] = [];
        assert_eq!(
            config.navigation_route_with_segments("greet", &["bob"]),
            Some((target("Greet"), layouts(&["Main"])))
        );
        assert!(config.navigation_route_with_segments("greet", &none).is_none());
    }

    #[test]
    fn test_target_url_with_segments() {
        let mut config = RouteConfiguration::new();
        config.set_route("greet", target("Greet"), &[]).unwrap();
        config
            .set_route_with_parameter("hello", target("Greet"), UrlParameter::Optional, &[])
            .unwrap();

        let url = config.target_url_with_segments(&target("Greet"), &["bob"]).unwrap();
        assert_eq!(url, "hello/bob");

        let none: [&str; 0] = [];
        let url = config.target_url_with_segments(&target("Greet"), &none).unwrap();
        assert_eq!(url, "greet");

        assert!(config.target_url_with_segments(&target("Greet"), &["a", "b"]).is_none());
    }

    #[test]
    fn test_diff() {
        let mut old = RouteConfiguration::new();
        old.set_route("a", target("A"), &[]).unwrap();
        old.set_route("b", target("B"), &[]).unwrap();

        let mut new = old.clone();
        new.remove_path("a").unwrap();
        new.set_parent_layouts("b", &layouts(&["Main"])).unwrap();
        new.set_route("c", target("C"), &[]).unwrap();

        let changes = old.diff(&new);
        assert_eq!(changes.added, vec![RoutePath::new("c").unwrap()]);
        assert_eq!(changes.removed, vec![RoutePath::new("a").unwrap()]);
        assert_eq!(changes.updated, vec![RoutePath::new("b").unwrap()]);
        assert!(old.diff(&old).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut config = with_aliases();
        config.clear();
        assert!(config.is_empty());
        assert_eq!(config.target_count(), 0);
    }
}
