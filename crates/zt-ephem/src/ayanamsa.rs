//! Ayanamsa: the offset between the tropical and a sidereal zodiac.
//!
//! Each system is pinned by its value at J2000.0. The offset at any other
//! epoch adds the IAU 2006 general precession accumulated since then.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::EphemerisError;
use crate::precession::general_precession_deg;
use crate::time::centuries_since_j2000;

/// Supported sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    /// Spica at 0 Libra; the Indian government standard.
    #[default]
    Lahiri,
    /// Synetic vernal point of Cyril Fagan and Donald Bradley.
    FaganBradley,
    Raman,
    /// Krishnamurti Paddhati.
    Krishnamurti,
    Yukteshwar,
    JnBhasin,
    DeLuce,
    Sassanian,
    /// Galactic center at 0 Sagittarius.
    GalacticCenter0Sag,
    /// Spica at 0 Libra, measured from the star itself.
    TrueCitra,
    /// Zeta Piscium at 29°50' Pisces.
    TrueRevati,
    /// Delta Cancri at 16 Cancer.
    TruePushya,
}

const ALL_AYANAMSAS: [Ayanamsa; 12] = [
    Ayanamsa::Lahiri,
    Ayanamsa::FaganBradley,
    Ayanamsa::Raman,
    Ayanamsa::Krishnamurti,
    Ayanamsa::Yukteshwar,
    Ayanamsa::JnBhasin,
    Ayanamsa::DeLuce,
    Ayanamsa::Sassanian,
    Ayanamsa::GalacticCenter0Sag,
    Ayanamsa::TrueCitra,
    Ayanamsa::TrueRevati,
    Ayanamsa::TruePushya,
];

const AYANAMSA_ALIASES: [(&str, Ayanamsa); 21] = [
    ("lahiri", Ayanamsa::Lahiri),
    ("fagan_bradley", Ayanamsa::FaganBradley),
    ("fagan", Ayanamsa::FaganBradley),
    ("bradley", Ayanamsa::FaganBradley),
    ("raman", Ayanamsa::Raman),
    ("krishnamurti", Ayanamsa::Krishnamurti),
    ("kp", Ayanamsa::Krishnamurti),
    ("yukteshwar", Ayanamsa::Yukteshwar),
    ("jn_bhasin", Ayanamsa::JnBhasin),
    ("bhasin", Ayanamsa::JnBhasin),
    ("deluce", Ayanamsa::DeLuce),
    ("de_luce", Ayanamsa::DeLuce),
    ("sassanian", Ayanamsa::Sassanian),
    ("galactic_center_0sag", Ayanamsa::GalacticCenter0Sag),
    ("galactic", Ayanamsa::GalacticCenter0Sag),
    ("true_citra", Ayanamsa::TrueCitra),
    ("citra", Ayanamsa::TrueCitra),
    ("true_revati", Ayanamsa::TrueRevati),
    ("revati", Ayanamsa::TrueRevati),
    ("true_pushya", Ayanamsa::TruePushya),
    ("pushya", Ayanamsa::TruePushya),
];

impl Ayanamsa {
    /// Canonical identifier accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lahiri => "lahiri",
            Self::FaganBradley => "fagan_bradley",
            Self::Raman => "raman",
            Self::Krishnamurti => "krishnamurti",
            Self::Yukteshwar => "yukteshwar",
            Self::JnBhasin => "jn_bhasin",
            Self::DeLuce => "de_luce",
            Self::Sassanian => "sassanian",
            Self::GalacticCenter0Sag => "galactic_center_0sag",
            Self::TrueCitra => "true_citra",
            Self::TrueRevati => "true_revati",
            Self::TruePushya => "true_pushya",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Lahiri => "Lahiri (Indian Standard)",
            Self::FaganBradley => "Fagan-Bradley (Western Sidereal)",
            Self::Raman => "Raman",
            Self::Krishnamurti => "Krishnamurti",
            Self::Yukteshwar => "Yukteshwar",
            Self::JnBhasin => "JN Bhasin",
            Self::DeLuce => "De Luce",
            Self::Sassanian => "Sassanian",
            Self::GalacticCenter0Sag => "Galactic Center 0° Sagittarius",
            Self::TrueCitra => "True Chitra",
            Self::TrueRevati => "True Revati",
            Self::TruePushya => "True Pushya",
        }
    }

    /// Offset at J2000.0 in degrees.
    ///
    /// Star-anchored systems use the star's J2000 ecliptic longitude minus
    /// its sidereal position. Proper motion is ignored.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.857,
            Self::FaganBradley => 24.740,
            Self::Raman => 22.411,
            Self::Krishnamurti => 23.760,
            Self::Yukteshwar => 22.479,
            Self::JnBhasin => 22.762,
            Self::DeLuce => 27.816,
            Self::Sassanian => 19.993,
            // Galactic center at λ 266.852°.
            Self::GalacticCenter0Sag => 26.852,
            // Spica at λ 203.841°.
            Self::TrueCitra => 23.841,
            // Zeta Piscium at λ 19.878°, placed at 359.833°.
            Self::TrueRevati => 20.044,
            // Delta Cancri at λ 128.722°.
            Self::TruePushya => 22.722,
        }
    }

    /// Offset at `t` Julian centuries since J2000.0, in degrees.
    pub fn value_deg(self, t: f64) -> f64 {
        self.reference_j2000_deg() + general_precession_deg(t)
    }

    /// Offset at a UTC instant, in degrees.
    pub fn value_at(self, instant: DateTime<Utc>) -> f64 {
        self.value_deg(centuries_since_j2000(instant))
    }

    pub const fn all() -> &'static [Self] {
        &ALL_AYANAMSAS
    }

    fn valid_names() -> String {
        let mut names: Vec<&str> = AYANAMSA_ALIASES.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for Ayanamsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Ayanamsa {
    type Err = EphemerisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        AYANAMSA_ALIASES
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, ayanamsa)| *ayanamsa)
            .ok_or_else(|| EphemerisError::UnknownAyanamsa {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}
