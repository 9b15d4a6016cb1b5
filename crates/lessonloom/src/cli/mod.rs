//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the lessonloom binary.
//! The CLI plays the caller's role: it reads pages and images from disk and
//! writes every produced blob into the output directory.

mod commands;
mod io;
mod run;

pub use commands::{Cli, Commands};
pub use run::run_command;
