//! Core search types with validation.

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Precondition violations rejected before a search starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The window does not span any time.
    #[error("search window start {start} must be before end {end}")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The coarse scan step must move time forward.
    #[error("coarse step must be positive, got {step}")]
    NonPositiveStep { step: TimeDelta },

    /// Invalid precision string.
    #[error("invalid precision: {value} (expected day or minute)")]
    InvalidQuantum { value: String },
}

/// Time resolution that reported boundaries are aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantum {
    /// Boundaries are floored to midnight UTC.
    #[default]
    Day,
    /// Boundaries are floored to the start of the minute.
    Minute,
}

impl Quantum {
    /// String representation used in config files and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Minute => "minute",
        }
    }

    /// Width of one quantum.
    #[must_use]
    pub fn duration(self) -> TimeDelta {
        match self {
            Self::Day => TimeDelta::days(1),
            Self::Minute => TimeDelta::minutes(1),
        }
    }

    /// Floors `instant` to the start of its quantum.
    ///
    /// This zeroes the smaller time components; it never rounds up.
    pub fn truncate(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Day => instant.date_naive().and_time(NaiveTime::MIN).and_utc(),
            Self::Minute => instant
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(instant),
        }
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Quantum {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "minute" => Ok(Self::Minute),
            _ => Err(SearchError::InvalidQuantum {
                value: s.to_string(),
            }),
        }
    }
}

/// The closed range `[start, end]` a search covers.
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SearchWindow {
    /// Creates a window, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, SearchError> {
        if start >= end {
            return Err(SearchError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A maximal stretch of time during which a body held one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<L> {
    /// Entry into the label (or the window start).
    pub start: DateTime<Utc>,
    /// Exit from the label (or the window end).
    pub end: DateTime<Utc>,
    /// The label held throughout.
    pub label: L,
}

impl<L> Interval<L> {
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Duration in fractional days.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_days(&self) -> f64 {
        self.duration().num_seconds() as f64 / 86_400.0
    }
}
