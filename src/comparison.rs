// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Differences between instants.
//!
//! Year, month, week and day differences are calendar differences: they
//! count whole units stepped on the local wall clock, so one month separates
//! January 15th and February 15th regardless of the days in between. Hour,
//! minute and second differences are elapsed time, truncated toward zero.

use crate::calendar::{Calendar, CalendarUnit};
use crate::chunk::TimeChunk;
use crate::manipulation::shift_months;
use chrono::{DateTime, Datelike, NaiveDateTime, TimeDelta, Utc};

/// A signed calendar breakdown of the span between two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Breakdown {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Breakdown {
    fn negated(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }
}

impl Calendar {
    /// Splits `from → to` into years, months, (weeks,) days and time.
    ///
    /// Negative when `to` is before `from`. Sub-second remainders are dropped.
    pub(crate) fn breakdown(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        with_weeks: bool,
    ) -> Breakdown {
        if to < from {
            return self.breakdown(to, from, with_weeks).negated();
        }
        let start = self.naive_local(from);
        let end = self.naive_local(to);

        let (total_months, anchor) = whole_months(start, end);
        let mut days = (end - anchor).num_days();
        let rest = end - anchor - TimeDelta::days(days);

        let mut weeks = 0;
        if with_weeks {
            weeks = days / 7;
            days %= 7;
        }
        Breakdown {
            years: total_months / 12,
            months: total_months % 12,
            weeks,
            days,
            hours: rest.num_hours(),
            minutes: rest.num_minutes() % 60,
            seconds: rest.num_seconds() % 60,
        }
    }

    /// Signed whole `unit`s from `other` to `instant`.
    ///
    /// Positive when `instant` is later than `other`.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, CalendarUnit};
    ///
    /// let cal = Calendar::UTC;
    /// let a = cal.date(2024, 3, 15).unwrap();
    /// let b = cal.date(2023, 1, 20).unwrap();
    /// assert_eq!(cal.difference(a, b, CalendarUnit::Month), 13);
    /// assert_eq!(cal.difference(b, a, CalendarUnit::Year), -1);
    /// ```
    pub fn difference(&self, instant: DateTime<Utc>, other: DateTime<Utc>, unit: CalendarUnit) -> i64 {
        match unit {
            CalendarUnit::Year => self.breakdown(other, instant, false).years,
            CalendarUnit::Month => {
                let parts = self.breakdown(other, instant, false);
                parts.years * 12 + parts.months
            }
            CalendarUnit::Week => self.local_days_between(other, instant) / 7,
            CalendarUnit::Day => self.local_days_between(other, instant),
            CalendarUnit::Hour => (instant - other).num_seconds() / 3_600,
            CalendarUnit::Minute => (instant - other).num_seconds() / 60,
            CalendarUnit::Second => (instant - other).num_seconds(),
        }
    }

    /// How many whole `unit`s `instant` is before `other`; zero if it is not.
    pub fn earlier_by(&self, instant: DateTime<Utc>, other: DateTime<Utc>, unit: CalendarUnit) -> i64 {
        self.difference(instant, other, unit).min(0).abs()
    }

    /// How many whole `unit`s `instant` is after `other`; zero if it is not.
    pub fn later_by(&self, instant: DateTime<Utc>, other: DateTime<Utc>, unit: CalendarUnit) -> i64 {
        self.difference(instant, other, unit).max(0)
    }

    /// Whole `unit`s from `now` until `instant`; zero once it has passed.
    pub fn until(&self, instant: DateTime<Utc>, now: DateTime<Utc>, unit: CalendarUnit) -> i64 {
        self.later_by(instant, now, unit)
    }

    /// Whole `unit`s since `instant` as of `now`; zero if it is in the future.
    pub fn ago(&self, instant: DateTime<Utc>, now: DateTime<Utc>, unit: CalendarUnit) -> i64 {
        self.earlier_by(instant, now, unit)
    }

    /// The chunk that carries `from` to `to` in this calendar.
    ///
    /// Weeks are folded into days, and every field is negative when `to` is
    /// earlier than `from`.
    pub fn chunk_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> TimeChunk {
        let parts = self.breakdown(from, to, false);
        TimeChunk::new(
            parts.seconds,
            parts.minutes,
            parts.hours,
            parts.days,
            0,
            parts.months,
            parts.years,
        )
    }

    /// Whether both instants fall on the same local day.
    pub fn is_same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.naive_local(a).date() == self.naive_local(b).date()
    }

    fn local_days_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        (self.naive_local(to) - self.naive_local(from)).num_days()
    }
}

/// The largest month count whose shifted start does not pass `end`.
fn whole_months(start: NaiveDateTime, end: NaiveDateTime) -> (i64, NaiveDateTime) {
    let mut months = i64::from(end.year() - start.year()) * 12 + i64::from(end.month())
        - i64::from(start.month());
    while months > 0 {
        match shift_months(start, months) {
            Some(anchor) if anchor <= end => return (months, anchor),
            _ => months -= 1,
        }
    }
    (0, start)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
