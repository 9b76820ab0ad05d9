//! Manifest error and diagnostic types.

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::route::RouteError;

/// Route manifest errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("route manifest parsing error")]
    Toml(#[from] toml::de::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ManifestDiagnostics),

    /// The registry rejected the batch (e.g. a path bound by another scope user).
    #[error("failed to apply route manifest")]
    Apply(#[from] RouteError),
}

// ============================================================================
// FieldPath
// ============================================================================

/// Location of a value inside the manifest, e.g. `routes[2].aliases[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Field `field` of the `index`-th `[[routes]]` table.
    pub fn route(index: usize, field: &str) -> Self {
        Self(format!("routes[{index}].{field}"))
    }

    /// Element `item` of list field `field` of the `index`-th route.
    pub fn route_item(index: usize, field: &str, item: usize) -> Self {
        Self(format!("routes[{index}].{field}[{item}]"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// One finding about one manifest field.
#[derive(Debug, Clone)]
pub struct ManifestDiagnostic {
    pub field: FieldPath,
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ManifestDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.as_str().cyan(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({} {hint})", "hint:".yellow())?;
        }
        Ok(())
    }
}

/// Findings of [`RouteManifest::validate`](super::RouteManifest::validate).
///
/// Errors reject the manifest; warnings are only printed.
#[derive(Debug, Default)]
pub struct ManifestDiagnostics {
    errors: Vec<ManifestDiagnostic>,
    warnings: Vec<ManifestDiagnostic>,
}

impl ManifestDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.errors.push(ManifestDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors.push(ManifestDiagnostic {
            field,
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push(ManifestDiagnostic {
            field,
            message: message.into(),
            hint: None,
        });
    }

    pub fn errors(&self) -> &[ManifestDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ManifestDiagnostic] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log every warning under one header.
    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "route manifest has {} warning(s):", self.warnings.len());
        for warning in &self.warnings {
            eprintln!("- {warning}");
        }
    }

    /// `Err(self)` if any error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ManifestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            "invalid route manifest".red().bold(),
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  {} {error}", "→".red())?;
        }
        Ok(())
    }
}

impl std::error::Error for ManifestDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_manifest_error_display() {
        let io_err = ManifestError::Io(
            PathBuf::from("routes.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("routes.toml"));
    }

    #[test]
    fn test_field_path_format() {
        assert_eq!(FieldPath::route(2, "target").as_str(), "routes[2].target");
        assert_eq!(
            FieldPath::route_item(0, "aliases", 1).as_str(),
            "routes[0].aliases[1]"
        );
    }

    #[test]
    fn test_diagnostics_into_result() {
        let mut diag = ManifestDiagnostics::new();
        diag.warn(FieldPath::route(0, "layouts"), "repeated layout");
        assert!(diag.into_result().is_ok());

        let mut diag = ManifestDiagnostics::new();
        diag.error_with_hint(FieldPath::route(0, "path"), "bad path", "remove `..`");
        diag.error(FieldPath::route(1, "target"), "empty target");
        let err = diag.into_result().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.errors()[0].hint.as_deref(), Some("remove `..`"));

        let display = err.to_string();
        assert!(display.contains("routes[0].path"));
        assert!(display.contains("bad path"));
        assert!(display.contains("routes[1].target"));
    }
}
