//! Route model: data, staging configuration, errors and change events.

mod configuration;
mod data;
mod error;
mod event;

pub use configuration::RouteConfiguration;
pub use data::RouteData;
pub use error::RouteError;
pub use event::RoutesChanged;
