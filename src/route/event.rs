//! Route change notification payload.

use serde::Serialize;

use crate::core::RoutePath;

/// Paths changed by one committed `configure` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutesChanged {
    /// Newly bound paths.
    pub added: Vec<RoutePath>,
    /// Unbound paths.
    pub removed: Vec<RoutePath>,
    /// Paths whose target, template or layout chain changed.
    pub updated: Vec<RoutePath>,
    /// Commit number within the scope, starting at 1. Zero when nothing
    /// was committed.
    pub revision: u64,
}

impl RoutesChanged {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Every changed path.
    pub fn changed_paths(&self) -> impl Iterator<Item = &RoutePath> {
        self.added
            .iter()
            .chain(self.removed.iter())
            .chain(self.updated.iter())
    }

    /// Number of changed paths.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }
}

impl std::fmt::Display for RoutesChanged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "+{} -{} ~{}",
            self.added.len(),
            self.removed.len(),
            self.updated.len()
        )
    }
}
