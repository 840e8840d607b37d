//! Geocentric ecliptic positions of the tracked bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;
use zt_core::Body;

use crate::EphemerisError;
use crate::kepler::{self, OrbitalElements};
use crate::moon;
use crate::precession::{date_to_j2000, j2000_to_date, normalize_deg};
use crate::time::{centuries_since_j2000, valid_from, valid_until};

/// Geocentric ecliptic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipticPosition {
    /// Longitude in `[0, 360)`.
    pub longitude: f64,
    pub latitude: f64,
}

/// Reference equinox a position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equinox {
    /// Mean equinox of the instant itself; what zodiac signs use.
    OfDate,
    /// Fixed J2000.0 equinox; what constellation boundaries are drawn in.
    J2000,
}

/// Low-precision analytical ephemeris.
///
/// Stateless and cheap to construct; the same inputs always produce the same
/// outputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ephemeris;

fn planet_elements(body: Body) -> Option<OrbitalElements> {
    match body {
        Body::Mercury => Some(kepler::MERCURY),
        Body::Venus => Some(kepler::VENUS),
        Body::Mars => Some(kepler::MARS),
        Body::Jupiter => Some(kepler::JUPITER),
        Body::Saturn => Some(kepler::SATURN),
        Body::Uranus => Some(kepler::URANUS),
        Body::Neptune => Some(kepler::NEPTUNE),
        Body::Pluto => Some(kepler::PLUTO),
        Body::Sun | Body::Moon => None,
    }
}

impl Ephemeris {
    pub const fn new() -> Self {
        Self
    }

    /// Inclusive range of instants this ephemeris answers for.
    pub fn valid_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (valid_from(), valid_until())
    }

    /// Position of `body` referred to the mean equinox of date.
    pub fn position(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        self.position_in(body, instant, Equinox::OfDate)
    }

    /// Position of `body` referred to the requested equinox.
    pub fn position_in(
        &self,
        body: Body,
        instant: DateTime<Utc>,
        equinox: Equinox,
    ) -> Result<EclipticPosition, EphemerisError> {
        let (min, max) = self.valid_range();
        if instant < min || instant > max {
            return Err(EphemerisError::OutOfRange { instant, min, max });
        }

        let t = centuries_since_j2000(instant);
        let position = if body == Body::Moon {
            let (longitude, latitude) = moon::position(t);
            let longitude = match equinox {
                Equinox::OfDate => normalize_deg(longitude),
                Equinox::J2000 => date_to_j2000(longitude, t),
            };
            EclipticPosition {
                longitude,
                latitude,
            }
        } else {
            let (longitude, latitude) = kepler::to_spherical(geocentric_j2000(body, t));
            let longitude = match equinox {
                Equinox::OfDate => j2000_to_date(longitude, t),
                Equinox::J2000 => normalize_deg(longitude),
            };
            EclipticPosition {
                longitude,
                latitude,
            }
        };

        tracing::trace!(
            body = body.as_str(),
            %instant,
            longitude = position.longitude,
            latitude = position.latitude,
            "ephemeris position"
        );
        Ok(position)
    }
}

/// Geocentric J2000 ecliptic vector for anything but the Moon.
fn geocentric_j2000(body: Body, t: f64) -> [f64; 3] {
    let earth = kepler::EARTH_MOON.heliocentric(t);
    let helio = planet_elements(body).map_or([0.0; 3], |elements| elements.heliocentric(t));
    [helio[0] - earth[0], helio[1] - earth[1], helio[2] - earth[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn longitude(body: Body, instant: DateTime<Utc>) -> f64 {
        Ephemeris::new().position(body, instant).unwrap().longitude
    }

    #[test]
    fn sun_near_equinox_and_solstice() {
        // March equinox 2021-03-20 09:37 UTC, June solstice 2021-06-21 03:32 UTC.
        let equinox = longitude(Body::Sun, utc(2021, 3, 20, 10));
        assert!(equinox < 0.1 || equinox > 359.9, "{equinox}");
        let solstice = longitude(Body::Sun, utc(2021, 6, 21, 4));
        assert!((solstice - 90.0).abs() < 0.1, "{solstice}");
    }

    #[test]
    fn sun_latitude_is_negligible() {
        let position = Ephemeris::new().position(Body::Sun, utc(2010, 8, 1, 0)).unwrap();
        assert!(position.latitude.abs() < 0.01);
    }

    #[test]
    fn jupiter_saturn_great_conjunction_2020() {
        // 2020-12-21: both near 0.5 degrees Aquarius (~300.5).
        let jupiter = longitude(Body::Jupiter, utc(2020, 12, 21, 18));
        let saturn = longitude(Body::Saturn, utc(2020, 12, 21, 18));
        assert!((jupiter - 300.5).abs() < 0.6, "jupiter {jupiter}");
        assert!((saturn - 300.5).abs() < 0.6, "saturn {saturn}");
    }

    #[test]
    fn moon_full_moon_opposes_sun() {
        // Full moon 2021-11-19 08:57 UTC.
        let instant = utc(2021, 11, 19, 9);
        let elongation = normalize_deg(longitude(Body::Moon, instant) - longitude(Body::Sun, instant));
        assert!((elongation - 180.0).abs() < 1.5, "{elongation}");
    }

    #[test]
    fn j2000_and_of_date_differ_by_precession() {
        let instant = utc(2021, 1, 1, 0);
        let ephemeris = Ephemeris::new();
        let of_date = ephemeris.position_in(Body::Mars, instant, Equinox::OfDate).unwrap();
        let j2000 = ephemeris.position_in(Body::Mars, instant, Equinox::J2000).unwrap();
        let shift = normalize_deg(of_date.longitude - j2000.longitude);
        assert!((shift - 0.293).abs() < 0.01, "{shift}");
        assert!((of_date.latitude - j2000.latitude).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_instants_are_rejected() {
        let ephemeris = Ephemeris::new();
        let err = ephemeris.position(Body::Sun, utc(1799, 12, 31, 23)).unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
        assert!(ephemeris.position(Body::Moon, utc(2051, 1, 1, 0)).is_err());
        assert!(ephemeris.position(Body::Pluto, utc(1800, 1, 1, 0)).is_ok());
    }

    #[test]
    fn every_body_has_a_position() {
        let ephemeris = Ephemeris::new();
        for body in Body::all() {
            let position = ephemeris.position(*body, utc(1990, 5, 5, 5)).unwrap();
            assert!((0.0..360.0).contains(&position.longitude), "{body}");
        }
    }
}
