//! Zodiac calculators: ephemeris positions classified into labels.
//!
//! Each calculator is a [`PositionOracle`] over [`Body`], so any of them can
//! drive a range search.

use chrono::{DateTime, Utc};
use serde::Serialize;
use zt_core::{Body, Constellation, PositionOracle, ZodiacSign};

use crate::EphemerisError;
use crate::ayanamsa::Ayanamsa;
use crate::ephemeris::{Ephemeris, Equinox};
use crate::precession::normalize_deg;

/// A body's label at one instant, with the longitude it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignPosition<L> {
    pub sign: L,
    /// Ecliptic longitude in `[0, 360)` degrees.
    pub longitude: f64,
    /// Degrees into the sign; `None` where labels have unequal widths.
    pub longitude_in_sign: Option<f64>,
}

impl<L> SignPosition<L> {
    /// Renders [`Self::longitude`] as degrees, minutes and seconds.
    ///
    /// `precision` 0 shows whole degrees, 1 adds minutes, anything higher adds
    /// seconds to two decimals.
    pub fn format_longitude(&self, precision: u8) -> String {
        format_dms(self.longitude, precision)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "angles are non-negative and below 360"
)]
/// Renders an angle in degrees as degrees, minutes and seconds.
pub fn format_dms(angle: f64, precision: u8) -> String {
    let degrees = angle.trunc();
    let remainder = (angle - degrees) * 60.0;
    let minutes = remainder.trunc();
    let seconds = (remainder - minutes) * 60.0;
    let (degrees, minutes) = (degrees as u32, minutes as u32);

    match precision {
        0 => format!("{degrees}°"),
        1 => format!("{degrees}°{minutes:02}'"),
        _ => format!("{degrees}°{minutes:02}'{seconds:05.2}\""),
    }
}

fn sign_position(longitude: f64) -> SignPosition<ZodiacSign> {
    SignPosition {
        sign: ZodiacSign::from_longitude(longitude),
        longitude,
        longitude_in_sign: Some(longitude % 30.0),
    }
}

/// Signs measured from the moving vernal equinox.
#[derive(Debug, Clone, Copy, Default)]
pub struct TropicalCalculator {
    ephemeris: Ephemeris,
}

impl TropicalCalculator {
    pub const fn new() -> Self {
        Self {
            ephemeris: Ephemeris::new(),
        }
    }

    pub fn position(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<SignPosition<ZodiacSign>, EphemerisError> {
        let position = self.ephemeris.position(body, instant)?;
        Ok(sign_position(position.longitude))
    }
}

impl PositionOracle<Body> for TropicalCalculator {
    type Label = ZodiacSign;
    type Error = EphemerisError;

    fn label_at(
        &self,
        body: &Body,
        instant: DateTime<Utc>,
    ) -> Result<Option<ZodiacSign>, EphemerisError> {
        Ok(Some(self.position(*body, instant)?.sign))
    }

    fn system_name(&self) -> String {
        "tropical".to_string()
    }
}

/// Signs measured from a star-anchored origin, offset by an ayanamsa.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiderealCalculator {
    ephemeris: Ephemeris,
    ayanamsa: Ayanamsa,
}

impl SiderealCalculator {
    pub const fn new(ayanamsa: Ayanamsa) -> Self {
        Self {
            ephemeris: Ephemeris::new(),
            ayanamsa,
        }
    }

    pub const fn ayanamsa(&self) -> Ayanamsa {
        self.ayanamsa
    }

    pub fn position(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<SignPosition<ZodiacSign>, EphemerisError> {
        let position = self.ephemeris.position(body, instant)?;
        let longitude = normalize_deg(position.longitude - self.ayanamsa.value_at(instant));
        Ok(sign_position(longitude))
    }
}

impl PositionOracle<Body> for SiderealCalculator {
    type Label = ZodiacSign;
    type Error = EphemerisError;

    fn label_at(
        &self,
        body: &Body,
        instant: DateTime<Utc>,
    ) -> Result<Option<ZodiacSign>, EphemerisError> {
        Ok(Some(self.position(*body, instant)?.sign))
    }

    fn system_name(&self) -> String {
        format!("sidereal ({})", self.ayanamsa.display_name())
    }
}

/// Half-width of the zodiacal band used to stand in for the non-ecliptic
/// constellations that border it.
pub const ZODIAC_BAND_LATITUDE: f64 = 9.0;

/// Where each constellation begins along the J2000 ecliptic, in order.
///
/// Pisces wraps through 0 degrees back to the start of Aries.
const CONSTELLATION_STARTS: [(f64, Constellation); 13] = [
    (28.69, Constellation::Aries),
    (53.42, Constellation::Taurus),
    (90.14, Constellation::Gemini),
    (118.26, Constellation::Cancer),
    (138.18, Constellation::Leo),
    (173.85, Constellation::Virgo),
    (217.81, Constellation::Libra),
    (241.14, Constellation::Scorpius),
    (247.70, Constellation::Ophiuchus),
    (266.30, Constellation::Sagittarius),
    (299.70, Constellation::Capricornus),
    (327.89, Constellation::Aquarius),
    (351.57, Constellation::Pisces),
];

/// Constellation at a J2000 ecliptic position.
///
/// `None` when the latitude is outside the zodiacal band.
pub fn constellation_at(longitude_j2000: f64, latitude: f64) -> Option<Constellation> {
    if latitude.abs() > ZODIAC_BAND_LATITUDE {
        return None;
    }
    let longitude = normalize_deg(longitude_j2000);
    let constellation = CONSTELLATION_STARTS
        .iter()
        .rev()
        .find(|(start, _)| longitude >= *start)
        .map_or(Constellation::Pisces, |(_, constellation)| *constellation);
    Some(constellation)
}

/// IAU constellations, including Ophiuchus.
#[derive(Debug, Clone, Copy, Default)]
pub struct AstronomicalCalculator {
    ephemeris: Ephemeris,
}

impl AstronomicalCalculator {
    pub const fn new() -> Self {
        Self {
            ephemeris: Ephemeris::new(),
        }
    }

    /// Reports the tropical longitude alongside the constellation; there is
    /// no meaningful offset within a constellation.
    pub fn position(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<Option<SignPosition<Constellation>>, EphemerisError> {
        let fixed = self.ephemeris.position_in(body, instant, Equinox::J2000)?;
        let Some(constellation) = constellation_at(fixed.longitude, fixed.latitude) else {
            tracing::debug!(
                body = body.as_str(),
                %instant,
                latitude = fixed.latitude,
                "outside the zodiacal band"
            );
            return Ok(None);
        };

        let of_date = self.ephemeris.position(body, instant)?;
        Ok(Some(SignPosition {
            sign: constellation,
            longitude: of_date.longitude,
            longitude_in_sign: None,
        }))
    }
}

impl PositionOracle<Body> for AstronomicalCalculator {
    type Label = Constellation;
    type Error = EphemerisError;

    fn label_at(
        &self,
        body: &Body,
        instant: DateTime<Utc>,
    ) -> Result<Option<Constellation>, EphemerisError> {
        Ok(self.position(*body, instant)?.map(|position| position.sign))
    }

    fn system_name(&self) -> String {
        "astronomical (IAU)".to_string()
    }
}
