//! Route manifest (`routes.toml`).
//!
//! A manifest declares routes as `[[routes]]` tables and is applied to a
//! registry as one atomic batch:
//!
//! ```toml
//! [[routes]]
//! path = "home"
//! target = "HomeView"
//! aliases = ["", "start"]
//! layouts = ["MainLayout"]
//! parameter = "none"      # none | required | optional | wildcard
//! ```
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error.rs   # ManifestError, ManifestDiagnostics, FieldPath
//! └── mod.rs     # RouteManifest (this file)
//! ```

mod error;

pub use error::{FieldPath, ManifestDiagnostic, ManifestDiagnostics, ManifestError};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
use crate::registry::ConfigureRoutes;
use crate::route::RoutesChanged;
use crate::{debug, log};

// ============================================================================
// root manifest
// ============================================================================

/// Root structure of a route manifest file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteManifest {
    /// Declared routes, applied in order
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,

    /// Keys present in the file but not understood (internal use only)
    #[serde(skip)]
    pub unknown_fields: Vec<String>,
}

/// One `[[routes]]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRoute {
    /// Primary path of the target
    pub path: String,

    /// Navigation target name
    pub target: String,

    /// Extra paths bound to the same target, after `path`
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Parent layout chain, innermost first
    #[serde(default)]
    pub layouts: Vec<String>,

    /// Parameter template shared by `path` and every alias
    #[serde(default)]
    pub parameter: UrlParameter,
}

impl ManifestRoute {
    /// `path` followed by every alias, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.path.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

impl RouteManifest {
    /// Parse a manifest from TOML text, recording unknown keys.
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let (mut manifest, ignored) = Self::parse_with_ignored(content)?;
        manifest.unknown_fields = ignored;
        Ok(manifest)
    }

    /// Load a manifest file, warning about unknown keys.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|err| ManifestError::Io(path.to_path_buf(), err))?;

        let manifest = Self::from_str(&content)?;
        if !manifest.unknown_fields.is_empty() {
            Self::print_unknown_fields_warning(&manifest.unknown_fields, path);
        }

        debug!("config"; "loaded {} route(s) from {}", manifest.routes.len(), path.display());
        Ok(manifest)
    }

    /// Load a manifest file and reject it if validation finds errors.
    pub fn load_validated(path: &Path) -> Result<Self, ManifestError> {
        let manifest = Self::load(path)?;
        let diagnostics = manifest.validate();
        diagnostics.print_warnings();
        diagnostics
            .into_result()
            .map_err(ManifestError::Diagnostics)?;
        Ok(manifest)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ManifestError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let manifest = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((manifest, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Number of paths the manifest binds (primary paths plus aliases).
    pub fn path_count(&self) -> usize {
        self.routes.iter().map(|r| 1 + r.aliases.len()).sum()
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check every route without touching a registry.
    ///
    /// Errors make [`apply`](Self::apply) fail; warnings are informational.
    pub fn validate(&self) -> ManifestDiagnostics {
        let mut diag = ManifestDiagnostics::new();
        // normalized path -> (owning target, first declaring field)
        let mut claimed: FxHashMap<RoutePath, (&str, FieldPath)> = FxHashMap::default();

        for (index, route) in self.routes.iter().enumerate() {
            if route.target.trim().is_empty() {
                diag.error(FieldPath::route(index, "target"), "navigation target must not be empty");
            }

            let declared = std::iter::once((FieldPath::route(index, "path"), route.path.as_str()))
                .chain(
                    route.aliases
                        .iter()
                        .enumerate()
                        .map(|(i, alias)| (FieldPath::route_item(index, "aliases", i), alias.as_str())),
                );

            for (field, raw) in declared {
                let path = match RoutePath::new(raw) {
                    Ok(path) => path,
                    Err(err) => {
                        diag.error_with_hint(
                            field,
                            err.to_string(),
                            "paths are relative, without `?`, `#`, `.`/`..` or empty segments",
                        );
                        continue;
                    }
                };

                match claimed.get(&path) {
                    Some((owner, first)) if *owner != route.target => {
                        diag.error_with_hint(
                            field,
                            format!("path '{path}' is already bound to '{owner}'"),
                            format!("first declared at {}", first.as_str()),
                        );
                    }
                    Some((_, first)) => {
                        diag.warn(
                            field,
                            format!("path '{path}' repeats {}", first.as_str()),
                        );
                    }
                    None => {
                        claimed.insert(path, (route.target.as_str(), field));
                    }
                }
            }

            for (i, layout) in route.layouts.iter().enumerate() {
                let field = FieldPath::route_item(index, "layouts", i);
                if layout.trim().is_empty() {
                    diag.error(field, "layout name must not be empty");
                } else if route.layouts[..i].contains(layout) {
                    diag.warn(field, format!("layout '{layout}' appears twice in the chain"));
                }
            }
        }

        diag
    }

    // ========================================================================
    // application
    // ========================================================================

    /// Register every route into `registry` as one atomic batch.
    ///
    /// On the first failing binding nothing is published and the registry's
    /// rejection comes back as [`ManifestError::Apply`].
    pub fn apply<R>(&self, registry: &R) -> Result<RoutesChanged, ManifestError>
    where
        R: ConfigureRoutes + ?Sized,
    {
        let changes = registry.configure(|routes| {
            for route in &self.routes {
                let target = NavigationTarget::new(&route.target);
                let layouts: Vec<LayoutId> = route.layouts.iter().map(LayoutId::new).collect();
                for path in route.paths() {
                    routes.set_route_with_parameter(path, target.clone(), route.parameter, &layouts)?;
                }
            }
            Ok(())
        })?;
        Ok(changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{AtomicRouteRegistry, RouteRegistry};
    use std::io::Write;

    const SAMPLE: &str = r#"
[[routes]]
path = "home"
target = "HomeView"
aliases = ["", "start"]
layouts = ["MainLayout"]

[[routes]]
path = "greet"
target = "GreetView"
parameter = "required"
"#;

    #[test]
    fn test_from_str() {
        let manifest = RouteManifest::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].aliases, vec!["", "start"]);
        assert_eq!(manifest.routes[1].parameter, UrlParameter::Required);
        assert_eq!(manifest.routes[1].layouts, Vec::<String>::new());
        assert_eq!(manifest.path_count(), 4);
        assert!(manifest.unknown_fields.is_empty());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = RouteManifest::from_str("").unwrap();
        assert!(manifest.routes.is_empty());
        assert!(manifest.validate().is_empty());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = r#"
title = "x"

[[routes]]
path = "a"
target = "A"
colour = "red"
"#;
        let manifest = RouteManifest::from_str(content).unwrap();
        assert_eq!(manifest.unknown_fields.len(), 2);
        assert!(manifest.unknown_fields.iter().any(|f| f.contains("colour")));
    }

    #[test]
    fn test_invalid_parameter_is_parse_error() {
        let content = r#"
[[routes]]
path = "a"
target = "A"
parameter = "sometimes"
"#;
        assert!(matches!(
            RouteManifest::from_str(content),
            Err(ManifestError::Toml(_))
        ));
    }

    #[test]
    fn test_validate_reports_conflicts() {
        let content = r#"
[[routes]]
path = "home"
target = "A"
aliases = ["a/../b"]
layouts = ["Main", "Main"]

[[routes]]
path = "/home/"
target = "B"

[[routes]]
path = "x"
target = ""
"#;
        let manifest = RouteManifest::from_str(content).unwrap();
        let diag = manifest.validate();

        let fields: Vec<&str> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["routes[0].aliases[0]", "routes[1].path", "routes[2].target"]);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].field.as_str(), "routes[0].layouts[1]");
    }

    #[test]
    fn test_validate_same_target_repeat_is_warning() {
        let content = r#"
[[routes]]
path = "home"
target = "A"
aliases = ["home"]
"#;
        let diag = RouteManifest::from_str(content).unwrap().validate();
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn test_apply_registers_aliases_in_order() {
        let registry = AtomicRouteRegistry::new("test");
        let manifest = RouteManifest::from_str(SAMPLE).unwrap();

        let changes = manifest.apply(&registry).unwrap();
        assert_eq!(changes.added.len(), 4);

        let home = NavigationTarget::new("HomeView");
        assert_eq!(registry.target_url(&home).unwrap(), "home");
        assert_eq!(registry.navigation_target("start"), Some(home.clone()));
        assert_eq!(registry.route_layouts("", &home), vec![LayoutId::new("MainLayout")]);
        assert_eq!(
            registry.navigation_target_with_segments("greet", &["bob"]),
            Some(NavigationTarget::new("GreetView"))
        );
    }

    #[test]
    fn test_apply_is_atomic() {
        let registry = AtomicRouteRegistry::new("test");
        registry
            .set_route("taken", NavigationTarget::new("Other"), &[])
            .unwrap();

        let content = r#"
[[routes]]
path = "fresh"
target = "A"

[[routes]]
path = "taken"
target = "A"
"#;
        let manifest = RouteManifest::from_str(content).unwrap();
        let err = manifest.apply(&registry).unwrap_err();

        assert!(matches!(&err, ManifestError::Apply(e) if e.is_duplicate()));
        assert!(registry.navigation_target("fresh").is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let manifest = RouteManifest::load_validated(file.path()).unwrap();
        assert_eq!(manifest.routes.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("routes.toml");

        let err = RouteManifest::load(&missing).unwrap_err();
        assert!(matches!(err, ManifestError::Io(path, _) if path == missing));
    }

    #[test]
    fn test_load_validated_rejects_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        std::fs::write(&path, "[[routes]]\npath = \"a//b\"\ntarget = \"A\"\n").unwrap();

        let err = RouteManifest::load_validated(&path).unwrap_err();
        match err {
            ManifestError::Diagnostics(diag) => assert_eq!(diag.errors().len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
