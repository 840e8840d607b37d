//! CLI subcommand implementations.

pub mod format;
pub mod list;
pub mod ranges;
pub mod sign;
pub mod util;
