//! Range finding: every maximal interval a body spends in one label.
//!
//! # Algorithm Summary
//!
//! 1. Sample the oracle at fixed coarse steps from the window start
//! 2. Track an OUTSIDE/INSIDE state machine over the samples
//! 3. On each state change, bisect between the two straddling samples to
//!    place the boundary to the precision quantum
//! 4. Close any interval still open at the window end, either at the end
//!    itself or at an exit that fell inside the final partial step
//!
//! Every exit closes exactly one interval before a later re-entry can open
//! another, so a body that leaves a sign and comes back (apparent retrograde
//! motion) yields separate intervals. An occupancy shorter than the coarse
//! step may fall between samples and go unreported.

use chrono::{DateTime, TimeDelta, Utc};

use crate::body::StepPolicy;
use crate::boundary::{Seek, locate};
use crate::oracle::{PositionOracle, matches};
use crate::types::{Interval, Quantum, SearchError, SearchWindow};

/// Binds an oracle to a step policy so callers only supply search inputs.
#[derive(Debug, Clone)]
pub struct RangeFinder<O, P> {
    oracle: O,
    policy: P,
}

impl<O, P> RangeFinder<O, P> {
    pub const fn new(oracle: O, policy: P) -> Self {
        Self { oracle, policy }
    }

    /// Starts a search using the policy's step for `entity`.
    pub fn find<'a, E>(
        &'a self,
        entity: &'a E,
        target: O::Label,
        window: SearchWindow,
        quantum: Quantum,
    ) -> Result<Ranges<'a, E, O>, SearchError>
    where
        O: PositionOracle<E>,
        P: StepPolicy<E>,
    {
        let step = self.policy.step_for(entity);
        find_ranges(&self.oracle, entity, target, window, step, quantum)
    }
}

/// Starts a lazy search for the intervals `entity` spends in `target`.
///
/// Nothing is sampled until the returned iterator is polled.
pub fn find_ranges<'a, E, O: PositionOracle<E>>(
    oracle: &'a O,
    entity: &'a E,
    target: O::Label,
    window: SearchWindow,
    step: TimeDelta,
    quantum: Quantum,
) -> Result<Ranges<'a, E, O>, SearchError> {
    if step <= TimeDelta::zero() {
        return Err(SearchError::NonPositiveStep { step });
    }

    tracing::debug!(
        system = %oracle.system_name(),
        start = %window.start(),
        end = %window.end(),
        %step,
        %quantum,
        "starting range search"
    );

    Ok(Ranges {
        oracle,
        entity,
        target,
        window,
        step,
        quantum,
        next: Some(window.start()),
        last: window.start(),
        state: ScanState::Outside,
    })
}

/// Position of the scan relative to the target label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    Inside {
        /// Where the open interval began.
        entry: DateTime<Utc>,
    },
    /// Window exhausted or the oracle failed.
    Done,
}

/// Lazy, ordered stream of intervals produced by [`find_ranges`].
///
/// Yields `Err` at most once, when the oracle fails; the stream is finished
/// after that. Dropping it early is always safe.
pub struct Ranges<'a, E, O: PositionOracle<E>> {
    oracle: &'a O,
    entity: &'a E,
    target: O::Label,
    window: SearchWindow,
    step: TimeDelta,
    quantum: Quantum,
    /// Next coarse sample instant; `None` once stepping overflowed the
    /// representable range, which is past any window end.
    next: Option<DateTime<Utc>>,
    /// Most recent coarse sample.
    last: DateTime<Utc>,
    state: ScanState,
}

impl<E, O: PositionOracle<E>> Ranges<'_, E, O> {
    /// Drains the stream, stopping at the first oracle failure.
    pub fn collect_all(self) -> Result<Vec<Interval<O::Label>>, O::Error> {
        self.collect()
    }

    fn matches(&self, instant: DateTime<Utc>) -> Result<bool, O::Error> {
        matches(self.oracle, self.entity, &self.target, instant)
    }

    fn locate(
        &self,
        before: DateTime<Utc>,
        after: DateTime<Utc>,
        seek: Seek,
    ) -> Result<DateTime<Utc>, O::Error> {
        locate(
            self.oracle,
            self.entity,
            &self.target,
            before,
            after,
            seek,
            self.quantum,
        )
    }

    /// Builds the interval, or drops it if truncation left it empty.
    fn close(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> Option<Interval<O::Label>> {
        if exit <= entry {
            tracing::debug!(%entry, %exit, "dropping interval shorter than one quantum");
            return None;
        }
        tracing::debug!(%entry, %exit, "interval found");
        Some(Interval {
            start: entry,
            end: exit,
            label: self.target.clone(),
        })
    }

    /// Runs the scan until the next interval closes or the window ends.
    fn scan(&mut self) -> Result<Option<Interval<O::Label>>, O::Error> {
        if self.state == ScanState::Done {
            return Ok(None);
        }

        while let Some(current) = self.next.filter(|t| *t <= self.window.end()) {
            let inside = self.matches(current)?;
            tracing::trace!(%current, inside, "coarse sample");
            let previous = std::mem::replace(&mut self.last, current);
            self.next = current.checked_add_signed(self.step);

            match (self.state, inside) {
                (ScanState::Outside, true) => {
                    // Nothing before the window is known, so the start itself
                    // is the boundary.
                    let entry = if current == self.window.start() {
                        current
                    } else {
                        self.locate(previous, current, Seek::Entry)?
                    };
                    self.state = ScanState::Inside { entry };
                }
                (ScanState::Inside { entry }, false) => {
                    let exit = self.locate(previous, current, Seek::Exit)?;
                    self.state = ScanState::Outside;
                    if let Some(interval) = self.close(entry, exit) {
                        return Ok(Some(interval));
                    }
                }
                _ => {}
            }
        }

        let ScanState::Inside { entry } = std::mem::replace(&mut self.state, ScanState::Done)
        else {
            return Ok(None);
        };

        let end = self.window.end();
        let exit = if self.matches(end)? {
            end
        } else {
            // The exit fell between the last sample and the window end.
            self.locate(self.last, end, Seek::Exit)?
        };
        Ok(self.close(entry, exit))
    }
}

impl<E, O: PositionOracle<E>> Iterator for Ranges<'_, E, O> {
    type Item = Result<Interval<O::Label>, O::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(interval) => interval.map(Ok),
            Err(err) => {
                self.state = ScanState::Done;
                Some(Err(err))
            }
        }
    }
}

impl<E, O: PositionOracle<E>> std::iter::FusedIterator for Ranges<'_, E, O> {}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::convert::Infallible;

    use chrono::TimeZone;
    use proptest::prelude::*;
    use thiserror::Error;

    use crate::body::FixedStep;
    use crate::oracle::FnOracle;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    fn day(n: i64) -> DateTime<Utc> {
        t0() + TimeDelta::days(n)
    }

    fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> SearchWindow {
        SearchWindow::new(start, end).unwrap()
    }

    /// Oracle that replays one label per whole day since `t0`, holding the
    /// last label forever after the sequence runs out.
    fn daily(labels: &'static [char]) -> FnOracle<impl Fn(&(), DateTime<Utc>) -> Option<char>> {
        FnOracle::new("daily", move |_: &(), t: DateTime<Utc>| {
            let index = usize::try_from((t - t0()).num_days()).unwrap_or(0);
            Some(labels[index.min(labels.len() - 1)])
        })
    }

    fn search<O: PositionOracle<()>>(
        oracle: &O,
        target: O::Label,
        window: SearchWindow,
        step: TimeDelta,
        quantum: Quantum,
    ) -> Vec<Interval<O::Label>>
    where
        O::Error: std::fmt::Debug,
    {
        find_ranges(oracle, &(), target, window, step, quantum)
            .unwrap()
            .collect_all()
            .unwrap()
    }

    #[test]
    fn reentry_produces_two_disjoint_intervals() {
        let oracle = daily(&['A', 'A', 'B', 'B', 'A', 'A', 'B', 'B']);
        let found = search(
            &oracle,
            'B',
            window(day(0), day(7)),
            TimeDelta::days(1),
            Quantum::Minute,
        );

        assert_eq!(found.len(), 2, "{found:?}");
        assert_eq!(found[0].start, day(2));
        assert!(found[0].end < day(4) && found[0].end >= day(4) - TimeDelta::minutes(2));
        assert_eq!(found[1].start, day(6));
        assert_eq!(found[1].end, day(7));
        assert!(found[0].end < found[1].start);
    }

    #[test]
    fn label_at_window_start_starts_exactly_there() {
        let oracle = daily(&['B', 'B', 'A']);
        let start = day(0) + TimeDelta::hours(5);
        let found = search(&oracle, 'B', window(start, day(2)), TimeDelta::hours(12), Quantum::Day);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, start);
    }

    #[test]
    fn same_day_exit_after_midday_start_is_dropped_at_day_precision() {
        // Held from the 12:00 window start until 18:00 the same day. Flooring
        // the exit to midnight puts it before the start, so nothing survives.
        let oracle = FnOracle::new("afternoon", |_: &(), t: DateTime<Utc>| {
            Some(if t < day(0) + TimeDelta::hours(18) { 'A' } else { 'B' })
        });
        let start = day(0) + TimeDelta::hours(12);
        let found = search(&oracle, 'A', window(start, day(4)), TimeDelta::days(1), Quantum::Day);
        assert!(found.is_empty(), "{found:?}");

        let found = search(&oracle, 'A', window(start, day(4)), TimeDelta::days(1), Quantum::Minute);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, start);
        assert_eq!(found[0].end, day(0) + TimeDelta::hours(17) + TimeDelta::minutes(59));
    }

    #[test]
    fn window_ending_at_max_instant_does_not_overflow() {
        let end = DateTime::<Utc>::MAX_UTC;
        let start = end - TimeDelta::days(10);

        let always = FnOracle::new("always", |_: &(), _: DateTime<Utc>| Some('A'));
        let found = search(&always, 'A', window(start, end), TimeDelta::days(7), Quantum::Minute);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, start);
        assert_eq!(found[0].end, end);

        let exit = start + TimeDelta::days(9);
        let until = FnOracle::new("until", move |_: &(), t: DateTime<Utc>| {
            Some(if t < exit { 'A' } else { 'B' })
        });
        let found = search(&until, 'A', window(start, end), TimeDelta::days(7), Quantum::Minute);
        assert_eq!(found.len(), 1);
        assert!(found[0].end < exit && found[0].end >= exit - TimeDelta::minutes(2));
    }

    #[test]
    fn step_beyond_representable_range_still_bisects_exit() {
        let oracle = FnOracle::new("early", |_: &(), t: DateTime<Utc>| {
            Some(if t < day(200) { 'A' } else { 'B' })
        });
        let step = TimeDelta::days(i64::from(u32::MAX));
        let found = search(&oracle, 'A', window(day(0), day(366)), step, Quantum::Minute);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, day(0));
        assert!(found[0].end < day(200) && found[0].end >= day(200) - TimeDelta::minutes(2));
    }

    #[test]
    fn label_at_window_end_ends_exactly_there() {
        let oracle = daily(&['A', 'A', 'B']);
        let end = day(5) + TimeDelta::hours(7);
        let found = search(&oracle, 'B', window(day(0), end), TimeDelta::days(1), Quantum::Minute);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, day(2));
        assert_eq!(found[0].end, end);
    }

    #[test]
    fn exit_inside_final_partial_step_is_bisected() {
        // Inside for 23 days; samples land on days 0, 10, 20 and the window
        // ends on day 25, after the exit.
        let oracle = FnOracle::new("exit", |_: &(), t: DateTime<Utc>| {
            Some(if t < day(23) { 'B' } else { 'A' })
        });
        let found = search(
            &oracle,
            'B',
            window(day(0), day(25)),
            TimeDelta::days(10),
            Quantum::Minute,
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, day(0));
        assert!(found[0].end < day(23));
        assert!(found[0].end >= day(23) - TimeDelta::minutes(2));
    }

    #[test]
    fn minimum_window_held_throughout_yields_whole_window() {
        let oracle = FnOracle::new("const", |_: &(), _: DateTime<Utc>| Some('B'));
        let found = search(
            &oracle,
            'B',
            window(day(0), day(1)),
            TimeDelta::days(30),
            Quantum::Day,
        );

        assert_eq!(
            found,
            vec![Interval {
                start: day(0),
                end: day(1),
                label: 'B'
            }]
        );
    }

    #[test]
    fn no_match_yields_nothing() {
        let oracle = FnOracle::new("const", |_: &(), _: DateTime<Utc>| Some('A'));
        let found = search(
            &oracle,
            'B',
            window(day(0), day(365)),
            TimeDelta::days(7),
            Quantum::Day,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn undefined_classification_counts_as_outside() {
        // B, then unclassifiable, then B again.
        let oracle = FnOracle::new("gaps", |_: &(), t: DateTime<Utc>| {
            if t >= day(3) && t < day(6) {
                None
            } else {
                Some('B')
            }
        });
        let found = search(
            &oracle,
            'B',
            window(day(0), day(10)),
            TimeDelta::days(1),
            Quantum::Minute,
        );

        assert_eq!(found.len(), 2, "{found:?}");
        assert_eq!(found[0].start, day(0));
        assert_eq!(found[1].start, day(6));
        assert_eq!(found[1].end, day(10));
    }

    #[test]
    fn searches_are_deterministic() {
        let oracle = daily(&['A', 'B', 'B', 'C', 'B', 'A', 'B']);
        let run = || {
            search(
                &oracle,
                'B',
                window(day(0), day(6) + TimeDelta::hours(3)),
                TimeDelta::hours(9),
                Quantum::Minute,
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let oracle = FnOracle::new("const", |_: &(), _: DateTime<Utc>| Some('B'));
        let result = find_ranges(
            &oracle,
            &(),
            'B',
            window(day(0), day(1)),
            TimeDelta::zero(),
            Quantum::Day,
        );
        assert!(matches!(result, Err(SearchError::NonPositiveStep { .. })));
    }

    #[test]
    fn range_finder_uses_policy_step() {
        let calls = Cell::new(0);
        let oracle = FnOracle::new("counting", |_: &(), _: DateTime<Utc>| {
            calls.set(calls.get() + 1);
            Some('A')
        });
        let finder = RangeFinder::new(&oracle, FixedStep(TimeDelta::days(10)));

        let found = finder
            .find(&(), 'B', window(day(0), day(100)), Quantum::Day)
            .unwrap()
            .collect_all()
            .unwrap();

        assert!(found.is_empty());
        // Samples on days 0, 10, ..., 100.
        assert_eq!(calls.get(), 11);
    }

    #[test]
    fn stream_can_be_abandoned_after_first_interval() {
        let calls = Cell::new(0);
        let oracle = FnOracle::new("counting", |_: &(), t: DateTime<Utc>| {
            calls.set(calls.get() + 1);
            let d = (t - t0()).num_days();
            Some(if d % 4 < 2 { 'B' } else { 'A' })
        });
        let mut ranges = find_ranges(
            &oracle,
            &(),
            'B',
            window(day(0), day(400)),
            TimeDelta::days(1),
            Quantum::Day,
        )
        .unwrap();

        let first = ranges.next().unwrap().unwrap();
        let after_first = calls.get();
        drop(ranges);

        assert_eq!(first.start, day(0));
        assert!(after_first < 10, "scanned too far: {after_first} calls");
    }

    #[test]
    fn oracle_calls_stay_within_bound() {
        let calls = Cell::new(0);
        let oracle = FnOracle::new("counting", |_: &(), t: DateTime<Utc>| {
            calls.set(calls.get() + 1);
            let d = (t - t0()).num_days();
            Some(if (d / 100) % 2 == 0 { 'A' } else { 'B' })
        });
        let step = TimeDelta::days(30);
        let found = search(&oracle, 'B', window(day(0), day(1000)), step, Quantum::Minute);

        // Transitions at days 100, 200, ..., 1000; the last one is bisected
        // from the final sample toward the window end.
        let transitions = 10;
        assert_eq!(found.len(), 5);
        // 30 days / 1 minute needs 16 probes per transition.
        let coarse = 1000 / 30 + 1;
        let bound = coarse + 1 + transitions * 16;
        assert!(calls.get() <= bound, "{} calls > {bound}", calls.get());
    }

    #[derive(Debug, Error)]
    #[error("no ephemeris data after {0}")]
    struct MissingData(DateTime<Utc>);

    struct FailingOracle {
        limit: DateTime<Utc>,
    }

    impl PositionOracle<()> for FailingOracle {
        type Label = char;
        type Error = MissingData;

        fn label_at(&self, _: &(), instant: DateTime<Utc>) -> Result<Option<char>, MissingData> {
            if instant > self.limit {
                return Err(MissingData(self.limit));
            }
            Ok(Some(if (instant - t0()).num_days() % 10 < 5 { 'B' } else { 'A' }))
        }

        fn system_name(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn oracle_failure_aborts_the_stream() {
        let oracle = FailingOracle { limit: day(22) };
        let mut ranges = find_ranges(
            &oracle,
            &(),
            'B',
            window(day(0), day(60)),
            TimeDelta::days(1),
            Quantum::Day,
        )
        .unwrap();

        let mut ok = 0;
        let mut errors = 0;
        for item in ranges.by_ref() {
            match item {
                Ok(_) => ok += 1,
                Err(err) => {
                    errors += 1;
                    assert_eq!(err.to_string(), format!("no ephemeris data after {}", day(22)));
                }
            }
        }

        assert_eq!(ok, 2);
        assert_eq!(errors, 1);
        assert!(ranges.next().is_none());
    }

    #[test]
    fn collect_all_surfaces_first_error() {
        let oracle = FailingOracle { limit: day(3) };
        let result = find_ranges(
            &oracle,
            &(),
            'B',
            window(day(0), day(60)),
            TimeDelta::days(1),
            Quantum::Day,
        )
        .unwrap()
        .collect_all();
        assert!(result.is_err());
    }

    #[test]
    fn infallible_oracle_type_checks() {
        let oracle = FnOracle::new("const", |_: &(), _: DateTime<Utc>| Some(1_u8));
        let ranges: Result<Vec<_>, Infallible> =
            find_ranges(&oracle, &(), 1, window(day(0), day(2)), TimeDelta::days(1), Quantum::Day)
                .unwrap()
                .collect_all();
        assert_eq!(ranges.unwrap().len(), 1);
    }

    /// Builds an oracle from (label, hours) segments laid end to end from `t0`.
    fn segments_oracle(
        segments: Vec<(u8, i64)>,
    ) -> FnOracle<impl Fn(&(), DateTime<Utc>) -> Option<u8>> {
        FnOracle::new("segments", move |_: &(), t: DateTime<Utc>| {
            let hours = (t - t0()).num_hours();
            let mut elapsed = 0;
            for (label, len) in &segments {
                elapsed += len;
                if hours < elapsed {
                    return Some(*label);
                }
            }
            segments.last().map(|(label, _)| *label)
        })
    }

    /// Number of maximal runs of `target` once equal neighbours are merged.
    fn count_runs(segments: &[(u8, i64)], target: u8) -> usize {
        let mut runs = 0;
        let mut previous = None;
        for (label, _) in segments {
            if *label == target && previous != Some(*label) {
                runs += 1;
            }
            previous = Some(*label);
        }
        runs
    }

    proptest! {
        #[test]
        fn intervals_are_ordered_disjoint_and_complete(
            segments in prop::collection::vec((0_u8..3, 24_i64..120), 1..25),
            target in 0_u8..3,
        ) {
            let total_hours: i64 = segments.iter().map(|(_, len)| len).sum();
            let expected = count_runs(&segments, target);
            let oracle = segments_oracle(segments);
            let found = search(
                &oracle,
                target,
                window(t0(), t0() + TimeDelta::hours(total_hours)),
                TimeDelta::hours(24),
                Quantum::Minute,
            );

            prop_assert_eq!(found.len(), expected);
            for interval in &found {
                prop_assert!(interval.start < interval.end);
                prop_assert_eq!(interval.label, target);
            }
            for pair in found.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }
}
