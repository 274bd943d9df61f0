// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Behaviour shared by period collections and chains.
//!
//! A group caches its extremes: the earliest beginning and the latest end of
//! its members. An open bound on any member makes the matching extreme open,
//! so a group never claims to know a bound that one of its periods lacks.

use crate::period::{TimePeriod, TimeSpan};
use chrono::{DateTime, TimeDelta, Utc};
use std::cmp::Ordering;

/// Read-only view shared by [`TimePeriodCollection`](crate::TimePeriodCollection)
/// and [`TimePeriodChain`](crate::TimePeriodChain).
pub trait TimePeriodGroup {
    /// Members in storage order.
    fn periods(&self) -> &[TimePeriod];

    /// Earliest member beginning, `None` if any member is open at the start.
    fn beginning(&self) -> Option<DateTime<Utc>>;

    /// Latest member end, `None` if any member is open at the end.
    fn end(&self) -> Option<DateTime<Utc>>;

    fn len(&self) -> usize {
        self.periods().len()
    }

    fn is_empty(&self) -> bool {
        self.periods().is_empty()
    }

    fn get(&self, index: usize) -> Option<&TimePeriod> {
        self.periods().get(index)
    }

    fn iter(&self) -> std::slice::Iter<'_, TimePeriod> {
        self.periods().iter()
    }

    /// Time between the extremes, `None` while either is open.
    fn duration(&self) -> Option<TimeDelta> {
        Some(self.end()? - self.beginning()?)
    }

    /// The extremes as a single period.
    fn bounding_period(&self) -> TimePeriod {
        TimePeriod::new(self.beginning(), self.end())
    }

    fn map_periods<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&TimePeriod) -> T,
    {
        self.iter().map(f).collect()
    }

    fn filter_periods<F>(&self, mut predicate: F) -> Vec<TimePeriod>
    where
        F: FnMut(&TimePeriod) -> bool,
    {
        self.iter().filter(|p| predicate(p)).copied().collect()
    }

    fn for_each_period<F>(&self, f: F)
    where
        F: FnMut(&TimePeriod),
    {
        self.iter().for_each(f);
    }

    fn fold_periods<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, &TimePeriod) -> B,
    {
        self.iter().fold(init, f)
    }

    /// Splits the members around separator periods.
    ///
    /// At most `max_splits` separators are honoured; with `omit_empty` runs
    /// between adjacent separators are dropped.
    fn split_periods<F>(&self, max_splits: usize, omit_empty: bool, mut is_separator: F) -> Vec<Vec<TimePeriod>>
    where
        F: FnMut(&TimePeriod) -> bool,
    {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        let mut splits = 0;
        for period in self.iter() {
            if splits < max_splits && is_separator(period) {
                splits += 1;
                if !(omit_empty && current.is_empty()) {
                    runs.push(std::mem::take(&mut current));
                }
            } else {
                current.push(*period);
            }
        }
        if !(omit_empty && current.is_empty()) {
            runs.push(current);
        }
        runs
    }

    /// Same members regardless of order, counting duplicates.
    fn same_periods<G: TimePeriodGroup + ?Sized>(&self, other: &G) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut mine = self.periods().to_vec();
        let mut theirs = other.periods().to_vec();
        mine.sort_by(canonical_order);
        theirs.sort_by(canonical_order);
        mine == theirs
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Extremes bookkeeping
// ═══════════════════════════════════════════════════════════════════════════

/// Cached earliest beginning and latest end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Extremes {
    pub beginning: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Extremes {
    /// Full rescan.
    pub fn of(periods: &[TimePeriod]) -> Self {
        let mut extremes = Self::default();
        for (index, period) in periods.iter().enumerate() {
            extremes.include(period, index == 0);
        }
        tracing::debug!(
            count = periods.len(),
            beginning = ?extremes.beginning,
            end = ?extremes.end,
            "recomputed group extremes"
        );
        extremes
    }

    /// Folds one more member in. The first member sets both extremes.
    pub fn include(&mut self, period: &TimePeriod, is_first: bool) {
        if is_first {
            self.beginning = period.beginning();
            self.end = period.end();
        } else {
            self.beginning = earliest(self.beginning, period.beginning());
            self.end = latest(self.end, period.end());
        }
    }
}

/// Earlier of two bounds; open if either is open.
pub(crate) fn earliest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    Some(a?.min(b?))
}

/// Later of two bounds; open if either is open.
pub(crate) fn latest(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    Some(a?.max(b?))
}

/// Ascending by beginning, open beginnings first.
pub(crate) fn by_beginning(a: &TimePeriod, b: &TimePeriod) -> Ordering {
    a.beginning.cmp(&b.beginning)
}

/// Beginning first, then end; total order used for multiset comparison.
fn canonical_order(a: &TimePeriod, b: &TimePeriod) -> Ordering {
    by_beginning(a, b).then_with(|| a.end.cmp(&b.end))
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Plain(Vec<TimePeriod>);

    impl TimePeriodGroup for Plain {
        fn periods(&self) -> &[TimePeriod] {
            &self.0
        }
        fn beginning(&self) -> Option<DateTime<Utc>> {
            Extremes::of(&self.0).beginning
        }
        fn end(&self) -> Option<DateTime<Utc>> {
            Extremes::of(&self.0).end
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn period(from: u32, to: u32) -> TimePeriod {
        TimePeriod::closed(at(from), at(to))
    }

    #[test]
    fn test_extremes_first_member_sets_both() {
        let extremes = Extremes::of(&[period(5, 6), period(1, 3), period(4, 9)]);
        assert_eq!(extremes.beginning, Some(at(1)));
        assert_eq!(extremes.end, Some(at(9)));
        assert_eq!(Extremes::of(&[]), Extremes::default());
    }

    #[test]
    fn test_extremes_propagate_open_bounds() {
        let open_start = TimePeriod::new(None, Some(at(2)));
        let extremes = Extremes::of(&[period(5, 6), open_start]);
        assert_eq!(extremes.beginning, None);
        assert_eq!(extremes.end, Some(at(6)));
    }

    #[test]
    fn test_group_views() {
        let group = Plain(vec![period(1, 2), period(3, 5), period(0, 4)]);
        assert_eq!(group.len(), 3);
        assert!(!group.is_empty());
        assert_eq!(group.get(1), Some(&period(3, 5)));
        assert_eq!(group.duration(), Some(TimeDelta::hours(5)));
        assert_eq!(group.bounding_period(), period(0, 5));

        let lengths = group.map_periods(|p| p.duration().num_hours());
        assert_eq!(lengths, vec![1, 2, 4]);
        assert_eq!(group.filter_periods(|p| p.duration() > TimeDelta::hours(1)).len(), 2);
        assert_eq!(
            group.fold_periods(TimeDelta::zero(), |acc, p| acc + p.duration()),
            TimeDelta::hours(7)
        );

        let mut seen = 0;
        group.for_each_period(|_| seen += 1);
        assert_eq!(seen, 3);
    }

    #[test]
    fn test_split_periods() {
        let separator = period(10, 11);
        let group = Plain(vec![
            separator,
            period(1, 2),
            separator,
            separator,
            period(3, 4),
        ]);
        let is_sep = |p: &TimePeriod| *p == separator;

        let all = group.split_periods(usize::MAX, false, is_sep);
        assert_eq!(all, vec![vec![], vec![period(1, 2)], vec![], vec![period(3, 4)]]);

        let compact = group.split_periods(usize::MAX, true, is_sep);
        assert_eq!(compact, vec![vec![period(1, 2)], vec![period(3, 4)]]);

        let limited = group.split_periods(1, true, is_sep);
        assert_eq!(limited, vec![vec![period(1, 2), separator, separator, period(3, 4)]]);
    }

    #[test]
    fn test_same_periods_is_a_multiset_comparison() {
        let a = Plain(vec![period(1, 2), period(1, 3), period(0, 4)]);
        let b = Plain(vec![period(0, 4), period(1, 3), period(1, 2)]);
        let c = Plain(vec![period(0, 4), period(1, 3), period(1, 3)]);
        assert!(a.same_periods(&b));
        assert!(!a.same_periods(&c));
        assert!(!a.same_periods(&Plain(vec![period(1, 2)])));
    }

    #[test]
    fn test_by_beginning_puts_open_first() {
        let open = TimePeriod::new(None, Some(at(1)));
        assert_eq!(by_beginning(&open, &period(0, 1)), Ordering::Less);
        assert_eq!(by_beginning(&period(2, 3), &period(2, 9)), Ordering::Equal);
    }
}
