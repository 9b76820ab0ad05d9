//! Registry setup shared by every command.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::RouteManifest;
use crate::context::{AppContext, Session};
use crate::registry::{ApplicationRouteRegistry, RouteRegistry, SessionRouteRegistry};
use crate::{debug, log};

/// Registries built from the command-line manifests.
///
/// Owns the context and session so the attached registries stay alive.
pub struct LoadedRoutes {
    pub context: Arc<AppContext>,
    pub application: Arc<ApplicationRouteRegistry>,
    pub session: Option<(Session, Arc<SessionRouteRegistry>)>,
}

impl LoadedRoutes {
    /// The innermost scope: the session overlay if one was loaded.
    pub fn registry(&self) -> &dyn RouteRegistry {
        match &self.session {
            Some((_, routes)) => &**routes,
            None => &*self.application,
        }
    }
}

/// Build the application registry from `config` and, if given, a session
/// registry over it from `session`.
pub fn load_routes(config: &Path, session: Option<&Path>) -> Result<LoadedRoutes> {
    let context = Arc::new(AppContext::new());
    let application = ApplicationRouteRegistry::instance(&context);

    let manifest = RouteManifest::load_validated(config)?;
    let changes = manifest
        .apply(&*application)
        .with_context(|| format!("failed to register routes of `{}`", config.display()))?;
    debug!("routes"; "application scope: {}", changes);

    let session = match session {
        Some(path) => {
            let session = Session::new(Arc::clone(&context));
            let routes = SessionRouteRegistry::for_session(&session)?;
            let overlay = RouteManifest::load_validated(path)?;
            let changes = overlay
                .apply(&*routes)
                .with_context(|| format!("failed to register routes of `{}`", path.display()))?;
            log!("session"; "layered {} over application routes", plural_count(changes.added.len(), "path"));
            Some((session, routes))
        }
        None => None,
    };

    Ok(LoadedRoutes {
        context,
        application,
        session,
    })
}

/// Format count with noun, handling pluralization (`1 path`, `3 paths`).
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
