//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod list;
pub mod resolve;

pub use args::{Cli, Commands, OverlayArgs};
