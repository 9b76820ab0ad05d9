//! `check` command: validate manifests and report what they register.

use anyhow::Result;
use rustc_hash::FxHashSet;

use super::common::{LoadedRoutes, plural_count};
use crate::log;
use crate::registry::RouteRegistry;

/// Execute check command
///
/// Loading already validated and applied every manifest; this reports the
/// resulting scopes.
pub fn run_check(routes: &LoadedRoutes) -> Result<()> {
    let global = routes.application.snapshot();
    log!(
        "routes";
        "application: {}, {}",
        plural_count(global.len(), "path"),
        plural_count(global.target_count(), "target")
    );

    if let Some((session, registry)) = &routes.session {
        let local = registry.local_snapshot();
        let shadowed = local
            .routes()
            .iter()
            .filter(|r| global.has_route(r.path.as_str()))
            .count();
        let visible: FxHashSet<_> = registry
            .registered_routes()
            .into_iter()
            .map(|r| r.path)
            .collect();
        log!(
            "session";
            "session {}: {} ({} shadowing application routes), {} visible",
            session.id(),
            plural_count(local.len(), "path"),
            shadowed,
            visible.len()
        );
    }

    log!("check"; "ok");
    Ok(())
}
