//! `resolve` command: map browser locations to navigation targets.

use std::io::Write;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use serde::Serialize;

use super::common::{LoadedRoutes, plural_count};
use crate::registry::{NavigationResolution, resolve_location};

/// Result for a single location
#[derive(Debug, Serialize)]
struct ResolveResult<'a> {
    location: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<NavigationResolution>,
}

/// Execute resolve command
///
/// Fails after printing every result if any location has no route.
pub fn run_resolve(routes: &LoadedRoutes, locations: &[String], json: bool) -> Result<()> {
    let registry = routes.registry();
    let results: Vec<ResolveResult<'_>> = locations
        .iter()
        .map(|location| ResolveResult {
            location,
            route: resolve_location(registry, location),
        })
        .collect();

    let mut stdout = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &results)?;
        writeln!(stdout)?;
    } else {
        for result in &results {
            writeln!(stdout, "{}", format_result(result))?;
        }
    }
    drop(stdout);

    let unresolved = results.iter().filter(|r| r.route.is_none()).count();
    if unresolved > 0 {
        bail!("{} did not resolve", plural_count(unresolved, "location"));
    }
    Ok(())
}

fn format_result(result: &ResolveResult<'_>) -> String {
    let Some(route) = &result.route else {
        return format!("{} {} {}", result.location, "→".dimmed(), "no route".red());
    };

    let mut line = format!(
        "{} {} {} {}",
        result.location,
        "→".dimmed(),
        route.target.as_str().cyan(),
        format!("(/{})", route.path).dimmed()
    );
    if !route.segments.is_empty() {
        line.push_str(&format!("  {} {}", "params:".dimmed(), route.segments.join(", ")));
    }
    if !route.layouts.is_empty() {
        let chain: Vec<&str> = route.layouts.iter().map(|l| l.as_str()).collect();
        line.push_str(&format!("  {} {}", "in".dimmed(), chain.join(" > ")));
    }
    line
}
