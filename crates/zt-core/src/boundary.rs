//! Boundary refinement by bisection.
//!
//! Given two instants that straddle a single label transition, narrow the gap
//! until it is no wider than the precision quantum, then floor the result to
//! that quantum.

use chrono::{DateTime, Utc};

use crate::oracle::{PositionOracle, matches};
use crate::types::Quantum;

/// Which side of a transition the caller is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seek {
    /// The first instant inside the target label.
    Entry,
    /// The last instant inside the target label.
    Exit,
}

impl Seek {
    /// Membership state that the sought side exhibits.
    const fn inside_after(self) -> bool {
        matches!(self, Self::Entry)
    }
}

/// Finds the transition between `before` and `after` to within `quantum`.
///
/// `before` and `after` must lie on opposite sides of exactly one transition
/// of `target` membership. If the bracket contains several crossings the
/// result is still quantum-aligned and no later than `after`, but which
/// crossing it lands on is unspecified.
///
/// The returned instant is biased toward the confirmed side: the first
/// sampled instant inside the label for [`Seek::Entry`], the last sampled
/// instant inside it for [`Seek::Exit`]. It is then floored to `quantum`.
pub fn locate<E, O: PositionOracle<E>>(
    oracle: &O,
    entity: &E,
    target: &O::Label,
    mut before: DateTime<Utc>,
    mut after: DateTime<Utc>,
    seek: Seek,
    quantum: Quantum,
) -> Result<DateTime<Utc>, O::Error> {
    let resolution = quantum.duration();
    let sought = seek.inside_after();

    while after - before > resolution {
        let mid = before + (after - before) / 2;
        let inside = matches(oracle, entity, target, mid)?;
        tracing::trace!(%mid, inside, ?seek, "bisection probe");

        // Invariant: membership at `after` equals `sought`, at `before` it doesn't.
        if inside == sought {
            after = mid;
        } else {
            before = mid;
        }
    }

    let result = match seek {
        Seek::Entry => after,
        Seek::Exit => before,
    };
    Ok(quantum.truncate(result))
}
