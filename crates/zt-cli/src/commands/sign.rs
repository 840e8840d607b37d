//! Sign command: where a planet is at one instant.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use zt_core::Body;
use zt_ephem::{AstronomicalCalculator, Ayanamsa, SiderealCalculator, TropicalCalculator};

use super::format::sign_line;
use crate::cli::SystemArg;

pub fn run<W: Write>(
    writer: &mut W,
    body: Body,
    instant: DateTime<Utc>,
    system: SystemArg,
    ayanamsa: Ayanamsa,
) -> Result<()> {
    let failed = || format!("failed to compute {body} position at {instant}");

    writeln!(writer, "{body} position:")?;
    writeln!(writer, "Date: {}", instant.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(writer)?;

    if system.includes(SystemArg::Tropical) {
        let position = TropicalCalculator::new()
            .position(body, instant)
            .with_context(failed)?;
        writeln!(writer, "{}", sign_line("Tropical", &position))?;
    }

    if system.includes(SystemArg::Sidereal) {
        let position = SiderealCalculator::new(ayanamsa)
            .position(body, instant)
            .with_context(failed)?;
        let label = format!("Sidereal ({})", ayanamsa.display_name());
        writeln!(writer, "{}", sign_line(&label, &position))?;
    }

    if system.includes(SystemArg::Astronomical) {
        match AstronomicalCalculator::new()
            .position(body, instant)
            .with_context(failed)?
        {
            Some(position) => writeln!(writer, "{}", sign_line("Astronomical", &position))?,
            None => writeln!(writer, "Astronomical: outside the ecliptic constellations")?,
        }
    }

    Ok(())
}
