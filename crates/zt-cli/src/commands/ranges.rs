//! Ranges command: every interval a planet spends in a sign.

use std::fmt::Display;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use zt_core::{
    Body, Constellation, PositionOracle, Quantum, RangeFinder, SearchWindow, StepTable, ZodiacSign,
};
use zt_ephem::{
    AstronomicalCalculator, Ayanamsa, EphemerisError, SiderealCalculator, TropicalCalculator,
};

use super::format::{self, RangeRecord, SystemRanges};
use crate::cli::{OutputFormat, SystemArg};

/// Everything one `zt ranges` invocation searches for.
#[derive(Debug, Clone)]
pub struct RangesRequest {
    pub body: Body,
    /// Target sign as typed; parsed per system.
    pub sign: String,
    pub window: SearchWindow,
    pub system: SystemArg,
    pub ayanamsa: Ayanamsa,
    pub quantum: Quantum,
    pub steps: StepTable,
}

impl RangesRequest {
    const fn include_time(&self) -> bool {
        matches!(self.quantum, Quantum::Minute)
    }

    /// Description used in the progress message.
    fn systems_label(&self) -> String {
        match self.system {
            SystemArg::All => "all systems".to_string(),
            SystemArg::Tropical => TropicalCalculator::new().system_name(),
            SystemArg::Sidereal => SiderealCalculator::new(self.ayanamsa).system_name(),
            SystemArg::Astronomical => AstronomicalCalculator::new().system_name(),
        }
    }
}

fn search_with<O>(request: &RangesRequest, oracle: O, target: O::Label) -> Result<SystemRanges>
where
    O: PositionOracle<Body, Error = EphemerisError>,
    O::Label: Display,
{
    let system = oracle.system_name();
    let finder = RangeFinder::new(oracle, request.steps.clone());
    let include_time = request.include_time();

    let records = finder
        .find(&request.body, target, request.window, request.quantum)?
        .map(|found| found.map(|interval| RangeRecord::from_interval(&interval, include_time)))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("{system} search for {} failed", request.body))?;

    tracing::debug!(%system, count = records.len(), "search complete");
    Ok(SystemRanges { system, records })
}

/// Runs the search in every selected system, in a fixed order.
pub fn search(request: &RangesRequest) -> Result<Vec<SystemRanges>> {
    let mut results = Vec::new();
    for system in SystemArg::CONCRETE {
        if !request.system.includes(system) {
            continue;
        }
        let result = match system {
            SystemArg::Tropical => {
                let target: ZodiacSign = request.sign.parse()?;
                search_with(request, TropicalCalculator::new(), target)?
            }
            SystemArg::Sidereal => {
                let target: ZodiacSign = request.sign.parse()?;
                search_with(request, SiderealCalculator::new(request.ayanamsa), target)?
            }
            SystemArg::Astronomical | SystemArg::All => {
                let target: Constellation = request.sign.parse()?;
                search_with(request, AstronomicalCalculator::new(), target)?
            }
        };
        results.push(result);
    }
    Ok(results)
}

/// Formats results; `--system all` always uses the grouped layouts.
pub fn render(results: &[SystemRanges], output_format: OutputFormat, grouped: bool) -> Result<String> {
    let records = || results.first().map_or(&[][..], |r| r.records.as_slice());
    Ok(match (output_format, grouped) {
        (OutputFormat::Table, false) => format::table(records()),
        (OutputFormat::Table, true) => format::multi_table(results),
        (OutputFormat::Json, false) => format::json(records())?,
        (OutputFormat::Json, true) => format::multi_json(results)?,
        (OutputFormat::Csv, false) => format::csv(records()),
        (OutputFormat::Csv, true) => format::multi_csv(results),
    })
}

/// Runs the search and writes the formatted results to `writer` or `output`.
///
/// Progress and warnings go to `status`.
pub fn run<W: Write, S: Write>(
    writer: &mut W,
    status: &mut S,
    request: &RangesRequest,
    output_format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    if output.is_some() && output_format == OutputFormat::Table {
        writeln!(
            status,
            "Warning: Table format is not ideal for file output. Consider using --format json or --format csv."
        )?;
    }

    if output_format == OutputFormat::Table {
        writeln!(
            status,
            "Searching for {} in {} ({})...",
            request.body,
            request.sign,
            request.systems_label()
        )?;
    }

    let results = search(request)?;
    let formatted = render(&results, output_format, request.system == SystemArg::All)?;

    match output {
        Some(path) => {
            std::fs::write(path, &formatted)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writeln!(status, "Results written to {}", path.display())?;
        }
        None => writeln!(writer, "{}", formatted.trim_end())?,
    }
    Ok(())
}
