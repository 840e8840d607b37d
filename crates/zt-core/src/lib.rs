//! Core domain logic for zodiac transit ranges.
//!
//! This crate contains the fundamental types and logic for:
//! - Range finding: every maximal interval a body spends in one label,
//!   including separate intervals for retrograde re-entries
//! - Boundary refinement: bisecting a coarse bracket down to a time quantum
//! - Labels: tropical zodiac signs and IAU constellations
//!
//! It knows nothing about ephemerides. Positions come from a
//! [`PositionOracle`] supplied by the caller.

pub mod body;
pub mod boundary;
pub mod oracle;
pub mod range;
pub mod sign;
pub mod types;

pub use body::{Body, FixedStep, StepPolicy, StepTable, UnknownBody};
pub use boundary::{Seek, locate};
pub use oracle::{FnOracle, PositionOracle};
pub use range::{RangeFinder, Ranges, find_ranges};
pub use sign::{Constellation, UnknownLabel, ZodiacSign};
pub use types::{Interval, Quantum, SearchError, SearchWindow};
