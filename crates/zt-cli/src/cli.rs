//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use zt_core::{Body, Quantum};

/// Zodiac transit range finder.
///
/// Finds which sign a planet occupies on a date, and every stretch of time it
/// spends in a sign, across the tropical, sidereal and astronomical (IAU)
/// systems.
#[derive(Debug, Parser)]
#[command(name = "zt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Boundary precision (day or minute). Overrides the config file.
    #[arg(long, global = true)]
    pub precision: Option<Quantum>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Zodiac systems selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SystemArg {
    Tropical,
    Sidereal,
    Astronomical,
    /// Every system, grouped in the output.
    All,
}

impl SystemArg {
    /// Concrete systems in search order.
    pub const CONCRETE: [Self; 3] = [Self::Tropical, Self::Sidereal, Self::Astronomical];

    /// Whether this selection covers `system`.
    pub fn includes(self, system: Self) -> bool {
        self == Self::All || self == system
    }
}

/// Output formats for range results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which sign a planet occupies at a date.
    ///
    /// Examples:
    ///   zt sign -p jupiter -d 2025-06-15
    ///   zt sign -p mars -d "2025-01-01 12:00" -s sidereal
    #[command(verbatim_doc_comment)]
    Sign {
        /// Planet name (sun, moon, mercury, ..., pluto).
        #[arg(short, long)]
        planet: Body,

        /// Date in UTC (YYYY-MM-DD, YYYY-MM-DD HH:MM, or "today").
        #[arg(short, long)]
        date: String,

        /// Zodiac system to use.
        #[arg(short, long, value_enum, default_value_t = SystemArg::All)]
        system: SystemArg,

        /// Ayanamsa for sidereal positions. Defaults to the configured one.
        #[arg(short, long)]
        ayanamsa: Option<String>,
    },

    /// Find every date range a planet spends in a sign.
    ///
    /// Examples:
    ///   zt ranges -p jupiter -g aquarius -s 2000-01-01 -e 2030-12-31
    ///   zt ranges -p moon -g cancer -s 2025-01-01 -e 2025-12-31 -f json
    #[command(verbatim_doc_comment)]
    Ranges {
        /// Planet name.
        #[arg(short, long)]
        planet: Body,

        /// Target zodiac sign or constellation.
        #[arg(short = 'g', long)]
        sign: String,

        /// Start of the search window in UTC.
        #[arg(short, long)]
        start: String,

        /// End of the search window in UTC.
        #[arg(short, long)]
        end: String,

        /// Zodiac system to use.
        #[arg(long, value_enum, default_value_t = SystemArg::All)]
        system: SystemArg,

        /// Ayanamsa for sidereal searches. Defaults to the configured one.
        #[arg(short, long)]
        ayanamsa: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Write results to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported planets.
    ListPlanets,

    /// List zodiac signs and ecliptic constellations.
    ListSigns,

    /// List supported ayanamsas.
    ListAyanamsas,
}
