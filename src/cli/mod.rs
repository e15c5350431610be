//! Command-line interface.
//!
//! - `commands`: argument definitions using clap derive
//! - `display`: console output formatting

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
