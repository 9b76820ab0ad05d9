//! `list` command: print every route visible from the selected scope.

use std::io::Write;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::common::{LoadedRoutes, plural_count};
use crate::core::UrlParameter;
use crate::log;
use crate::route::RouteData;

/// Execute list command
pub fn run_list(routes: &LoadedRoutes, json: bool) -> Result<()> {
    let listing = routes.registry().registered_routes();

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &listing)?;
        writeln!(stdout)?;
        return Ok(());
    }

    let width = listing
        .iter()
        .map(|r| display_path(r).len())
        .max()
        .unwrap_or(0);
    for route in &listing {
        writeln!(stdout, "{}", format_route(route, width))?;
    }
    drop(stdout);

    log!("routes"; "{} listed", plural_count(listing.len(), "route"));
    Ok(())
}

/// Path with its parameter template appended, e.g. `/greet/{param}`.
fn display_path(route: &RouteData) -> String {
    let suffix = match route.parameter {
        UrlParameter::None => "",
        UrlParameter::Required => "/{param}",
        UrlParameter::Optional => "/{param?}",
        UrlParameter::Wildcard => "/{*}",
    };
    match (route.path.is_root(), suffix) {
        (true, "") => "/".to_string(),
        (true, suffix) => suffix.to_string(),
        (false, suffix) => format!("/{}{}", route.path, suffix),
    }
}

fn format_route(route: &RouteData, width: usize) -> String {
    let mut line = format!(
        "{:<width$}  {} {}",
        display_path(route),
        "→".dimmed(),
        route.navigation_target.as_str().cyan()
    );
    if !route.parent_layouts.is_empty() {
        let chain: Vec<&str> = route.parent_layouts.iter().map(|l| l.as_str()).collect();
        line.push_str(&format!("  {} {}", "in".dimmed(), chain.join(" > ")));
    }
    if !route.route_aliases.is_empty() {
        let aliases: Vec<String> = route.route_aliases.iter().map(|a| format!("/{a}")).collect();
        line.push_str(&format!("  {}", format!("(aliases: {})", aliases.join(", ")).dimmed()));
    }
    line
}
