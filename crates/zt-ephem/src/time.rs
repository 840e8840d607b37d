//! Julian dates and the ephemeris validity window.

use chrono::{DateTime, NaiveDate, Utc};

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian Date for a UTC instant.
///
/// UTC is used directly as the dynamical time scale. The roughly one minute
/// offset is far below the accuracy of the mean elements.
#[expect(
    clippy::cast_precision_loss,
    reason = "timestamps within the valid range fit comfortably in f64"
)]
pub fn julian_date(instant: DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0.
pub fn centuries_since_j2000(instant: DateTime<Utc>) -> f64 {
    (julian_date(instant) - J2000_JD) / DAYS_PER_CENTURY
}

/// First instant the mean elements are fitted for.
pub fn valid_from() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1800, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::MIN_UTC, |t| t.and_utc())
}

/// Last instant the mean elements are fitted for.
pub fn valid_until() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2050, 12, 31)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map_or(DateTime::<Utc>::MAX_UTC, |t| t.and_utc())
}
