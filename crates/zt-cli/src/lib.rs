//! Zodiac transit CLI library.
//!
//! This crate provides the CLI interface for the zodiac range finder.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, OutputFormat, SystemArg};
pub use config::Config;
