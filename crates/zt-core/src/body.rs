//! Tracked bodies and the coarse-step policy used to scan them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for body names that are not recognized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown planet: {0}. Valid options: {valid}", valid = Body::valid_names())]
pub struct UnknownBody(pub String);

/// Celestial bodies whose sign occupancy can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// Lowercase identifier used on the command line and in config files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
        }
    }

    /// Capitalized display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
        }
    }

    /// Default coarse scan step in days.
    ///
    /// Sized to the body's shortest expected stay in one sign, so faster
    /// bodies get smaller steps.
    #[must_use]
    pub const fn default_step_days(&self) -> i64 {
        match self {
            Self::Moon => 1,
            Self::Mercury => 5,
            Self::Sun | Self::Venus => 7,
            Self::Mars => 14,
            Self::Jupiter | Self::Saturn => 30,
            Self::Uranus | Self::Neptune | Self::Pluto => 90,
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL_BODIES
    }

    fn valid_names() -> String {
        let mut names: Vec<_> = ALL_BODIES.iter().map(Self::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ALL_BODIES
            .iter()
            .copied()
            .find(|b| b.as_str() == normalized)
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

/// Chooses the coarse scan step for an entity.
///
/// The range finder never inspects entities itself; it only asks the policy
/// how far apart coarse samples may be.
pub trait StepPolicy<E> {
    fn step_for(&self, entity: &E) -> TimeDelta;
}

/// Step policy backed by a per-body table.
///
/// Bodies without an explicit entry fall back to [`Body::default_step_days`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepTable {
    overrides: HashMap<Body, TimeDelta>,
}

impl StepTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the step for one body.
    #[must_use]
    pub fn with_step(mut self, body: Body, step: TimeDelta) -> Self {
        self.overrides.insert(body, step);
        self
    }

    /// Effective step for `body`.
    #[must_use]
    pub fn step(&self, body: Body) -> TimeDelta {
        self.overrides
            .get(&body)
            .copied()
            .unwrap_or_else(|| TimeDelta::days(body.default_step_days()))
    }
}

impl StepPolicy<Body> for StepTable {
    fn step_for(&self, entity: &Body) -> TimeDelta {
        self.step(*entity)
    }
}

/// Every entity is scanned with the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStep(pub TimeDelta);

impl<E> StepPolicy<E> for FixedStep {
    fn step_for(&self, _entity: &E) -> TimeDelta {
        self.0
    }
}
