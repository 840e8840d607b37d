//! Analytical ephemeris and zodiac calculators.
//!
//! Provides low-precision geocentric positions for the Sun, Moon and planets,
//! and the tropical, sidereal and astronomical calculators that turn those
//! positions into labels for the range finder in `zt-core`.
//!
//! # Accuracy
//!
//! Planets use Keplerian mean elements, the Moon a truncated series. Both are
//! good to a fraction of a degree between 1800 and 2050, which places most
//! sign boundaries within hours. Instants outside that span are rejected
//! rather than extrapolated.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod ayanamsa;
pub mod calculator;
pub mod ephemeris;
mod kepler;
mod moon;
pub mod precession;
pub mod time;

pub use ayanamsa::Ayanamsa;
pub use calculator::{
    AstronomicalCalculator, SiderealCalculator, SignPosition, TropicalCalculator, constellation_at,
    format_dms,
};
pub use ephemeris::{EclipticPosition, Ephemeris, Equinox};

/// Ephemeris and calculator errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EphemerisError {
    /// The instant lies outside the span the mean elements are fitted for.
    #[error("{instant} is outside the supported ephemeris range {min} to {max}")]
    OutOfRange {
        instant: DateTime<Utc>,
        min: DateTime<Utc>,
        max: DateTime<Utc>,
    },
    /// Unrecognized ayanamsa name.
    #[error("unknown ayanamsa: {name}. Valid options: {valid}")]
    UnknownAyanamsa { name: String, valid: String },
}
