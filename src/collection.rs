// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Unordered period collection.
//!
//! A [`TimePeriodCollection`] stores periods in insertion order and lets them
//! overlap freely. Appending folds the new member into the cached extremes;
//! inserting or removing at an arbitrary index rescans.

use crate::error::{CalendarError, Result};
use crate::group::{by_beginning, Extremes, TimePeriodGroup};
use crate::period::{IntervalKind, TimePeriod, TimeSpan};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::ops::Index;

/// Periods that may overlap, kept in the order they were added.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempoch_calendar::{TimePeriod, TimePeriodCollection, TimePeriodGroup};
///
/// let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
/// let mut collection = TimePeriodCollection::new();
/// collection.append(TimePeriod::closed(day(5), day(9)));
/// collection.append(TimePeriod::closed(day(2), day(6)));
///
/// assert_eq!(collection.beginning(), Some(day(2)));
/// assert_eq!(collection.end(), Some(day(9)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimePeriodCollection {
    periods: Vec<TimePeriod>,
    extremes: Extremes,
}

impl TimePeriodCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from any spans, copying their bounds.
    pub fn from_spans<I>(spans: I) -> Self
    where
        I: IntoIterator,
        I::Item: TimeSpan,
    {
        let mut collection = Self::new();
        collection.append_all(spans);
        collection
    }

    fn from_vec(periods: Vec<TimePeriod>) -> Self {
        let extremes = Extremes::of(&periods);
        Self { periods, extremes }
    }

    // ── mutation ──────────────────────────────────────────────────────

    /// Adds a copy of `span` at the end.
    pub fn append<S: TimeSpan>(&mut self, span: S) {
        let period = TimePeriod::from_span(&span);
        self.extremes.include(&period, self.periods.is_empty());
        self.periods.push(period);
    }

    pub fn append_all<I>(&mut self, spans: I)
    where
        I: IntoIterator,
        I::Item: TimeSpan,
    {
        for span in spans {
            self.append(span);
        }
    }

    /// Appends every member of another group.
    pub fn append_group<G: TimePeriodGroup + ?Sized>(&mut self, group: &G) {
        self.append_all(group.iter());
    }

    /// Inserts a copy of `span` before `index`.
    ///
    /// # Errors
    ///
    /// [`CalendarError::IndexOutOfRange`] when `index > len`.
    pub fn insert<S: TimeSpan>(&mut self, index: usize, span: S) -> Result<()> {
        let len = self.periods.len();
        if index > len {
            return Err(CalendarError::IndexOutOfRange { index, len });
        }
        let period = TimePeriod::from_span(&span);
        self.extremes.include(&period, len == 0);
        self.periods.insert(index, period);
        Ok(())
    }

    /// Removes and returns the member at `index`, or `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<TimePeriod> {
        if index >= self.periods.len() {
            return None;
        }
        let removed = self.periods.remove(index);
        self.extremes = Extremes::of(&self.periods);
        Some(removed)
    }

    pub fn remove_all(&mut self) {
        self.periods.clear();
        self.extremes = Extremes::default();
    }

    // ── sorting ───────────────────────────────────────────────────────

    /// Stable ascending sort by beginning; open beginnings come first.
    pub fn sort_by_beginning(&mut self) {
        self.periods.sort_by(by_beginning);
    }

    pub fn sorted_by_beginning(&self) -> Self {
        let mut copy = self.clone();
        copy.sort_by_beginning();
        copy
    }

    /// Stable sort with a caller-supplied ordering.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&TimePeriod, &TimePeriod) -> Ordering,
    {
        self.periods.sort_by(compare);
    }

    pub fn sorted_by<F>(&self, compare: F) -> Self
    where
        F: FnMut(&TimePeriod, &TimePeriod) -> Ordering,
    {
        let mut copy = self.clone();
        copy.sort_by(compare);
        copy
    }

    // ── queries ───────────────────────────────────────────────────────

    /// Members lying within `span`, bounds included.
    pub fn all_inside<S: TimeSpan + ?Sized>(&self, span: &S) -> Self {
        self.filter(|p| p.is_inside(span))
    }

    /// Members containing `instant`, bounds included.
    pub fn periods_intersected_by(&self, instant: DateTime<Utc>) -> Self {
        self.filter(|p| p.contains_instant(instant, IntervalKind::Closed))
    }

    /// Members intersecting `span`.
    pub fn periods_intersected<S: TimeSpan + ?Sized>(&self, span: &S) -> Self {
        self.filter(|p| p.intersects(span))
    }

    /// Members matching `predicate`, as a new collection.
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: FnMut(&TimePeriod) -> bool,
    {
        Self::from_vec(self.filter_periods(predicate))
    }

    /// Transforms every member; extremes are recomputed from scratch.
    pub fn map<S, F>(&self, mut transform: F) -> Self
    where
        S: TimeSpan,
        F: FnMut(&TimePeriod) -> S,
    {
        Self::from_vec(
            self.periods
                .iter()
                .map(|p| TimePeriod::from_span(&transform(p)))
                .collect(),
        )
    }
}

impl TimePeriodGroup for TimePeriodCollection {
    #[inline]
    fn periods(&self) -> &[TimePeriod] {
        &self.periods
    }

    #[inline]
    fn beginning(&self) -> Option<DateTime<Utc>> {
        self.extremes.beginning
    }

    #[inline]
    fn end(&self) -> Option<DateTime<Utc>> {
        self.extremes.end
    }
}

/// Order-independent comparison of members.
impl PartialEq for TimePeriodCollection {
    fn eq(&self, other: &Self) -> bool {
        self.same_periods(other)
    }
}

impl Eq for TimePeriodCollection {}

impl Index<usize> for TimePeriodCollection {
    type Output = TimePeriod;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.periods[index]
    }
}

impl<'a> IntoIterator for &'a TimePeriodCollection {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;
    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

impl IntoIterator for TimePeriodCollection {
    type Item = TimePeriod;
    type IntoIter = std::vec::IntoIter<TimePeriod>;
    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl FromIterator<TimePeriod> for TimePeriodCollection {
    fn from_iter<I: IntoIterator<Item = TimePeriod>>(iter: I) -> Self {
        Self::from_spans(iter)
    }
}

impl Extend<TimePeriod> for TimePeriodCollection {
    fn extend<I: IntoIterator<Item = TimePeriod>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
