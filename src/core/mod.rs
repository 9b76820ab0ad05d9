//! Core routing vocabulary: paths, navigation targets, layouts.

mod path;
mod target;

pub use path::RoutePath;
pub use target::{LayoutId, NavigationTarget, UrlParameter};
