//! The position oracle consumed by the search.

use std::convert::Infallible;
use std::error::Error;

use chrono::{DateTime, Utc};

/// Classifies an entity's position at an instant.
///
/// This trait lets the range finder work with any classification scheme
/// (tropical, sidereal, constellation boundaries, or test fixtures).
///
/// Implementations must be deterministic: the same entity and instant always
/// produce the same answer within a process run. The search may call
/// `label_at` many times, in any order, at instants inside the window.
pub trait PositionOracle<E> {
    /// The label domain this oracle classifies into.
    type Label: Clone + PartialEq;

    /// Failure to compute a position at all (e.g. missing backing data).
    type Error: Error;

    /// Returns the label held at `instant`.
    ///
    /// `Ok(None)` means the position is valid but falls outside every label
    /// in the domain; it never matches a target.
    fn label_at(
        &self,
        entity: &E,
        instant: DateTime<Utc>,
    ) -> Result<Option<Self::Label>, Self::Error>;

    /// Human-readable name of the classification scheme.
    fn system_name(&self) -> String;
}

impl<E, O: PositionOracle<E> + ?Sized> PositionOracle<E> for &O {
    type Label = O::Label;
    type Error = O::Error;

    fn label_at(
        &self,
        entity: &E,
        instant: DateTime<Utc>,
    ) -> Result<Option<Self::Label>, Self::Error> {
        (**self).label_at(entity, instant)
    }

    fn system_name(&self) -> String {
        (**self).system_name()
    }
}

/// Oracle backed by an infallible closure.
pub struct FnOracle<F> {
    name: String,
    f: F,
}

impl<F> FnOracle<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<E, L, F> PositionOracle<E> for FnOracle<F>
where
    L: Clone + PartialEq,
    F: Fn(&E, DateTime<Utc>) -> Option<L>,
{
    type Label = L;
    type Error = Infallible;

    fn label_at(&self, entity: &E, instant: DateTime<Utc>) -> Result<Option<L>, Infallible> {
        Ok((self.f)(entity, instant))
    }

    fn system_name(&self) -> String {
        self.name.clone()
    }
}

/// Whether the oracle places `entity` in `target` at `instant`.
pub(crate) fn matches<E, O: PositionOracle<E>>(
    oracle: &O,
    entity: &E,
    target: &O::Label,
    instant: DateTime<Utc>,
) -> Result<bool, O::Error> {
    Ok(oracle
        .label_at(entity, instant)?
        .is_some_and(|label| label == *target))
}
