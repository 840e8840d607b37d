//! General precession in longitude (IAU 2006).
//!
//! Moves ecliptic longitudes between the fixed J2000 equinox and the mean
//! equinox of date. Latitudes are left untouched; the ecliptic's own slow
//! motion is below the accuracy of everything else here.

/// Accumulated general precession since J2000.0, in degrees.
///
/// `t` is in Julian centuries since J2000.0 (TT).
pub fn general_precession_deg(t: f64) -> f64 {
    let arcsec = (((((-0.000_000_038_3 * t) - 0.000_023_857) * t + 0.000_079_64) * t
        + 1.105_434_8)
        * t
        + 5_028.796_195)
        * t;
    arcsec / 3_600.0
}

/// Normalizes an angle to `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// J2000 ecliptic longitude to mean equinox of date.
pub fn j2000_to_date(longitude: f64, t: f64) -> f64 {
    normalize_deg(longitude + general_precession_deg(t))
}

/// Mean equinox of date ecliptic longitude to J2000.
pub fn date_to_j2000(longitude: f64, t: f64) -> f64 {
    normalize_deg(longitude - general_precession_deg(t))
}
