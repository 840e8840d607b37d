//! Label domains: the 12-sign zodiac and the 13 ecliptic constellations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for label strings outside the active domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}. Valid options: {valid}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

impl UnknownLabel {
    fn new(kind: &'static str, value: &str, aliases: &[(&str, impl Copy)]) -> Self {
        let mut names: Vec<&str> = aliases.iter().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names.dedup();
        Self {
            kind,
            value: value.to_string(),
            valid: names.join(", "),
        }
    }
}

/// Traditional 12-sign zodiac used by the tropical and sidereal systems.
///
/// Each sign covers a 30 degree segment of ecliptic longitude starting at
/// Aries = 0 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in longitude order.
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

const SIGN_ALIASES: [(&str, ZodiacSign); 23] = [
    ("aries", ZodiacSign::Aries),
    ("ari", ZodiacSign::Aries),
    ("taurus", ZodiacSign::Taurus),
    ("tau", ZodiacSign::Taurus),
    ("gemini", ZodiacSign::Gemini),
    ("gem", ZodiacSign::Gemini),
    ("cancer", ZodiacSign::Cancer),
    ("can", ZodiacSign::Cancer),
    ("leo", ZodiacSign::Leo),
    ("virgo", ZodiacSign::Virgo),
    ("vir", ZodiacSign::Virgo),
    ("libra", ZodiacSign::Libra),
    ("lib", ZodiacSign::Libra),
    ("scorpio", ZodiacSign::Scorpio),
    ("sco", ZodiacSign::Scorpio),
    ("sagittarius", ZodiacSign::Sagittarius),
    ("sag", ZodiacSign::Sagittarius),
    ("capricorn", ZodiacSign::Capricorn),
    ("cap", ZodiacSign::Capricorn),
    ("aquarius", ZodiacSign::Aquarius),
    ("aqu", ZodiacSign::Aquarius),
    ("pisces", ZodiacSign::Pisces),
    ("pis", ZodiacSign::Pisces),
];

impl ZodiacSign {
    /// Zero-based index in longitude order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Capitalized display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Starting longitude in degrees.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn longitude_start(self) -> f64 {
        (self.index() * 30) as f64
    }

    /// Ending longitude in degrees (exclusive).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn longitude_end(self) -> f64 {
        ((self.index() + 1) * 30) as f64
    }

    /// Sign containing an ecliptic longitude. Any finite value is accepted and
    /// normalized into `[0, 360)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_longitude(longitude: f64) -> Self {
        let normalized = longitude.rem_euclid(360.0);
        let index = (normalized / 30.0).floor() as usize;
        ALL_SIGNS[index.min(11)]
    }

    /// All 12 signs.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL_SIGNS
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        SIGN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, sign)| *sign)
            .ok_or_else(|| UnknownLabel::new("sign", s, &SIGN_ALIASES))
    }
}

/// The 13 IAU constellations the ecliptic passes through.
///
/// Used by the astronomical system. Unlike [`ZodiacSign`], spans are unequal
/// and include Ophiuchus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constellation {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpius,
    Ophiuchus,
    Sagittarius,
    Capricornus,
    Aquarius,
    Pisces,
}

/// All 13 constellations in ecliptic order starting from Aries.
pub const ALL_CONSTELLATIONS: [Constellation; 13] = [
    Constellation::Aries,
    Constellation::Taurus,
    Constellation::Gemini,
    Constellation::Cancer,
    Constellation::Leo,
    Constellation::Virgo,
    Constellation::Libra,
    Constellation::Scorpius,
    Constellation::Ophiuchus,
    Constellation::Sagittarius,
    Constellation::Capricornus,
    Constellation::Aquarius,
    Constellation::Pisces,
];

const CONSTELLATION_ALIASES: [(&str, Constellation); 30] = [
    ("aries", Constellation::Aries),
    ("ari", Constellation::Aries),
    ("taurus", Constellation::Taurus),
    ("tau", Constellation::Taurus),
    ("gemini", Constellation::Gemini),
    ("gem", Constellation::Gemini),
    ("cancer", Constellation::Cancer),
    ("cnc", Constellation::Cancer),
    ("leo", Constellation::Leo),
    ("virgo", Constellation::Virgo),
    ("vir", Constellation::Virgo),
    ("libra", Constellation::Libra),
    ("lib", Constellation::Libra),
    ("scorpius", Constellation::Scorpius),
    ("scorpio", Constellation::Scorpius),
    ("sco", Constellation::Scorpius),
    ("ophiuchus", Constellation::Ophiuchus),
    ("oph", Constellation::Ophiuchus),
    ("sagittarius", Constellation::Sagittarius),
    ("sgr", Constellation::Sagittarius),
    ("sag", Constellation::Sagittarius),
    ("capricornus", Constellation::Capricornus),
    ("capricorn", Constellation::Capricornus),
    ("cap", Constellation::Capricornus),
    ("aquarius", Constellation::Aquarius),
    ("aqr", Constellation::Aquarius),
    ("aqu", Constellation::Aquarius),
    ("pisces", Constellation::Pisces),
    ("psc", Constellation::Pisces),
    ("pis", Constellation::Pisces),
];

impl Constellation {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpius => "Scorpius",
            Self::Ophiuchus => "Ophiuchus",
            Self::Sagittarius => "Sagittarius",
            Self::Capricornus => "Capricornus",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Official IAU 3-letter abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Aries => "Ari",
            Self::Taurus => "Tau",
            Self::Gemini => "Gem",
            Self::Cancer => "Cnc",
            Self::Leo => "Leo",
            Self::Virgo => "Vir",
            Self::Libra => "Lib",
            Self::Scorpius => "Sco",
            Self::Ophiuchus => "Oph",
            Self::Sagittarius => "Sgr",
            Self::Capricornus => "Cap",
            Self::Aquarius => "Aqr",
            Self::Pisces => "Psc",
        }
    }

    /// Looks up an IAU abbreviation, case-insensitively.
    ///
    /// Returns `None` for constellations off the ecliptic (e.g. `Cet`, `Ori`).
    #[must_use]
    pub fn from_abbreviation(abbrev: &str) -> Option<Self> {
        let abbrev = abbrev.trim();
        ALL_CONSTELLATIONS
            .iter()
            .copied()
            .find(|c| c.abbreviation().eq_ignore_ascii_case(abbrev))
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL_CONSTELLATIONS
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Constellation {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        CONSTELLATION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, c)| *c)
            .ok_or_else(|| UnknownLabel::new("constellation", s, &CONSTELLATION_ALIASES))
    }
}
