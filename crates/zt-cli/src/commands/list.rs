//! Listing commands for planets, signs and ayanamsas.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use zt_core::{Body, Constellation, ZodiacSign};
use zt_ephem::Ayanamsa;

pub fn format_planets() -> String {
    let mut output = String::from("Available planets:\n");
    for body in Body::all() {
        writeln!(output, "  {:<15} {}", body.as_str(), body.name()).unwrap();
    }
    output
}

/// Zodiac signs with their longitude spans, then the ecliptic constellations.
pub fn format_signs() -> String {
    let mut output = String::from("Zodiac signs (tropical and sidereal):\n");
    for sign in ZodiacSign::all() {
        writeln!(
            output,
            "  {:<15} {:>5.0}° - {:>5.0}°",
            sign.name().to_lowercase(),
            sign.longitude_start(),
            sign.longitude_end()
        )
        .unwrap();
    }

    output.push_str("\nConstellations (astronomical):\n");
    for constellation in Constellation::all() {
        writeln!(
            output,
            "  {:<15} ({})",
            constellation.name().to_lowercase(),
            constellation.abbreviation()
        )
        .unwrap();
    }
    output
}

pub fn format_ayanamsas() -> String {
    let mut output = String::from("Available ayanamsas:\n");
    for ayanamsa in Ayanamsa::all() {
        writeln!(output, "  {:<20} {}", ayanamsa.as_str(), ayanamsa.display_name()).unwrap();
    }
    output
}

pub fn planets<W: Write>(writer: &mut W) -> Result<()> {
    write!(writer, "{}", format_planets())?;
    Ok(())
}

pub fn signs<W: Write>(writer: &mut W) -> Result<()> {
    write!(writer, "{}", format_signs())?;
    Ok(())
}

pub fn ayanamsas<W: Write>(writer: &mut W) -> Result<()> {
    write!(writer, "{}", format_ayanamsas())?;
    Ok(())
}
