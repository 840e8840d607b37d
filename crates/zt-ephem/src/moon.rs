//! Truncated lunar theory.
//!
//! Principal periodic terms only, referred to the mean equinox of date. Good
//! to a few tenths of a degree, which keeps the Moon's sign boundaries within
//! about an hour.

/// Longitude terms: (amplitude, phase, rate per century), all in degrees.
const LONGITUDE_TERMS: [(f64, f64, f64); 6] = [
    (6.29, 135.0, 477_198.87),
    (-1.27, 259.3, -413_335.36),
    (0.66, 235.7, 890_534.22),
    (0.21, 269.9, 954_397.74),
    (-0.19, 357.5, 35_999.05),
    (-0.11, 186.5, 966_404.03),
];

const LATITUDE_TERMS: [(f64, f64, f64); 4] = [
    (5.13, 93.3, 483_202.02),
    (0.28, 228.2, 960_400.89),
    (-0.28, 318.3, 6_003.15),
    (-0.17, 217.6, -407_332.21),
];

fn series(terms: &[(f64, f64, f64)], t: f64) -> f64 {
    terms
        .iter()
        .map(|(amplitude, phase, rate)| amplitude * (phase + rate * t).to_radians().sin())
        .sum()
}

/// Geocentric ecliptic longitude and latitude (degrees, of date).
///
/// Longitude is not normalized.
pub fn position(t: f64) -> (f64, f64) {
    let longitude = 218.32 + 481_267.881 * t + series(&LONGITUDE_TERMS, t);
    let latitude = series(&LATITUDE_TERMS, t);
    (longitude, latitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::precession::normalize_deg;

    #[test]
    fn latitude_bounded_by_orbital_inclination() {
        for step in 0..400 {
            let t = f64::from(step) * 0.0005;
            let (_, latitude) = position(t);
            assert!(latitude.abs() < 5.9, "t={t} latitude={latitude}");
        }
    }

    #[test]
    fn moves_about_thirteen_degrees_per_day() {
        let day = 1.0 / 36_525.0;
        let (a, _) = position(0.2);
        let (b, _) = position(0.2 + day);
        let motion = normalize_deg(b - a);
        assert!((10.0..16.0).contains(&motion), "{motion}");
    }
}
