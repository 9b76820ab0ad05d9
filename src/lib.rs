//! Waypost - a layered, snapshot-based route registry.
//!
//! Routes map relative URL paths to navigation targets. Each application
//! context owns one [`ApplicationRouteRegistry`]; each session may layer a
//! [`SessionRouteRegistry`] over it whose bindings shadow the global ones.
//!
//! Reads load an immutable [`RouteConfiguration`] snapshot and never block.
//! Writes stage a copy, validate it and publish it atomically, so readers
//! observe whole batches or nothing.

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod logger;
pub mod registry;
pub mod route;

pub use crate::context::{AppContext, Session};
pub use crate::core::{LayoutId, NavigationTarget, RoutePath, UrlParameter};
pub use crate::registry::{
    ApplicationRouteRegistry, AtomicRouteRegistry, ConfigureRoutes, RouteRegistry,
    SessionRouteRegistry, resolve_location,
};
pub use crate::route::{RouteConfiguration, RouteData, RouteError, RoutesChanged};
