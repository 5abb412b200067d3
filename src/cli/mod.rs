//! Command-line interface module.

mod args;
pub mod collect;
pub mod common;
pub mod routes;

pub use args::{Cli, CollectArgs, Commands, OutputFormat, RoutesArgs};
