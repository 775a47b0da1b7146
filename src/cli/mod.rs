//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;
mod parse;

pub use args::{Args, Command, ConfigAction, MapArgs, RunArgs};
pub use commands::{apply_run_overrides, handle_config_action, map_group, run, run_pipeline};
pub use enums::{Correction, Output};
pub use parse::{parse_inset, parse_point, parse_rect, parse_viewport};
