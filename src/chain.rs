// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Contiguous period chain.
//!
//! A [`TimePeriodChain`] holds closed periods laid end to start: every
//! member begins exactly where its predecessor ends. Members keep their own
//! length and the chain decides where they sit, so appending a period only
//! uses its duration, and inserting or removing one reflows everything after
//! it.

use crate::calendar::Calendar;
use crate::chunk::TimeChunk;
use crate::error::{CalendarError, Result};
use crate::group::{Extremes, TimePeriodGroup};
use crate::period::{TimePeriod, TimeSpan};
use chrono::{DateTime, TimeDelta, Utc};
use std::ops::Index;

/// Closed periods placed back to back.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use tempoch_calendar::{TimePeriod, TimePeriodChain, TimePeriodGroup};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let mut chain = TimePeriodChain::new();
/// chain.append(TimePeriod::starting_at(t0, TimeDelta::hours(1))).unwrap();
/// // Only the length of the second period matters.
/// chain.append(TimePeriod::starting_at(t0 - TimeDelta::days(7), TimeDelta::minutes(30))).unwrap();
///
/// assert_eq!(chain[1].beginning, Some(t0 + TimeDelta::hours(1)));
/// assert_eq!(chain.end(), Some(t0 + TimeDelta::minutes(90)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimePeriodChain {
    periods: Vec<TimePeriod>,
    extremes: Extremes,
}

impl TimePeriodChain {
    pub fn new() -> Self {
        Self::default()
    }

    // ── mutation ──────────────────────────────────────────────────────

    /// Adds a period after the current tail, keeping only its length.
    ///
    /// The first period keeps its own beginning.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidChainInsert`] if `span` is open or ends before
    /// it begins. The chain is left untouched.
    pub fn append<S: TimeSpan>(&mut self, span: S) -> Result<()> {
        let (beginning, end) = closed_bounds(&span, "append")?;
        let length = end - beginning;

        let placed = match self.periods.last().and_then(|tail| tail.end) {
            Some(tail_end) => TimePeriod::starting_at(tail_end, length),
            None => TimePeriod::closed(beginning, end),
        };
        self.extremes.include(&placed, self.periods.is_empty());
        self.periods.push(placed);
        Ok(())
    }

    /// Appends every member of another group, in order.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidChainInsert`] if any member is open; nothing
    /// is appended in that case.
    pub fn append_group<G: TimePeriodGroup + ?Sized>(&mut self, group: &G) -> Result<()> {
        for period in group.iter() {
            closed_bounds(period, "append")?;
        }
        for period in group.iter() {
            self.append(period)?;
        }
        Ok(())
    }

    /// Inserts a period before `index` and reflows everything after it.
    ///
    /// At index 0 the inserted period keeps its own bounds and becomes the
    /// new head; elsewhere it begins where its predecessor ends. Each later
    /// member keeps its own length.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidChainInsert`] if `span` is open or ends before
    /// it begins, [`CalendarError::IndexOutOfRange`] if `index > len`.
    pub fn insert<S: TimeSpan>(&mut self, index: usize, span: S) -> Result<()> {
        let (beginning, end) = closed_bounds(&span, "insert")?;
        let len = self.periods.len();
        if index > len {
            return Err(CalendarError::IndexOutOfRange { index, len });
        }

        self.periods.insert(index, TimePeriod::closed(beginning, end));
        self.reflow_from(index.max(1));
        self.extremes = Extremes::of(&self.periods);
        Ok(())
    }

    /// Removes the member at `index`; later members move back by its length.
    pub fn remove(&mut self, index: usize) -> Option<TimePeriod> {
        if index >= self.periods.len() {
            return None;
        }
        let removed = self.periods.remove(index);
        let length = removed.duration();
        for period in &mut self.periods[index..] {
            period.shift(-length);
        }
        tracing::debug!(index, ?length, "closed chain gap after removal");
        self.extremes = Extremes::of(&self.periods);
        Some(removed)
    }

    /// Removes and returns the tail.
    pub fn pop(&mut self) -> Option<TimePeriod> {
        let popped = self.periods.pop()?;
        self.extremes = Extremes::of(&self.periods);
        Some(popped)
    }

    pub fn remove_all(&mut self) {
        self.periods.clear();
        self.extremes = Extremes::default();
    }

    /// Moves the whole chain by `delta`.
    pub fn shift(&mut self, delta: TimeDelta) {
        for period in &mut self.periods {
            period.shift(delta);
        }
        self.extremes.beginning = self.extremes.beginning.map(|b| b + delta);
        self.extremes.end = self.extremes.end.map(|e| e + delta);
    }

    /// Moves every bound by `chunk` on `calendar`.
    ///
    /// Calendar chunks can change member lengths (one month from January 31st
    /// is shorter than from March 1st); the chain stays contiguous because
    /// every shared bound moves to the same instant.
    pub fn shift_by_chunk(&mut self, chunk: &TimeChunk, calendar: &Calendar) {
        for period in &mut self.periods {
            period.shift_by_chunk(chunk, calendar);
        }
        self.extremes = Extremes::of(&self.periods);
    }

    // ── views ─────────────────────────────────────────────────────────

    /// Transforms every member into an arbitrary value.
    pub fn map<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&TimePeriod) -> T,
    {
        self.map_periods(f)
    }

    /// Members matching `predicate`, copied out.
    ///
    /// The result is a plain list: a filtered chain would have holes.
    pub fn filter<F>(&self, predicate: F) -> Vec<TimePeriod>
    where
        F: FnMut(&TimePeriod) -> bool,
    {
        self.filter_periods(predicate)
    }

    /// Places each member from `start` onward right after its predecessor.
    fn reflow_from(&mut self, start: usize) {
        for index in start..self.periods.len() {
            let length = self.periods[index].duration();
            if let Some(previous_end) = self.periods[index - 1].end {
                self.periods[index] = TimePeriod::starting_at(previous_end, length);
            }
        }
        tracing::debug!(from = start, count = self.periods.len(), "reflowed chain");
    }
}

/// Bounds of a period that may join a chain.
fn closed_bounds<S: TimeSpan + ?Sized>(
    span: &S,
    operation: &'static str,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    match span.bounds() {
        Some((beginning, end)) if beginning <= end => Ok((beginning, end)),
        Some((beginning, end)) => {
            tracing::warn!(operation, %beginning, %end, "rejected chain period that ends before it begins");
            Err(CalendarError::InvalidChainInsert("period ends before it begins"))
        }
        None => {
            tracing::warn!(operation, "rejected open-ended chain period");
            Err(CalendarError::InvalidChainInsert("chain periods need both a beginning and an end"))
        }
    }
}

impl TimePeriodGroup for TimePeriodChain {
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

/// Same periods at the same positions.
impl PartialEq for TimePeriodChain {
    fn eq(&self, other: &Self) -> bool {
        self.periods == other.periods
    }
}

impl Eq for TimePeriodChain {}

impl Index<usize> for TimePeriodChain {
    type Output = TimePeriod;
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.periods[index]
    }
}

impl<'a> IntoIterator for &'a TimePeriodChain {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;
    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
