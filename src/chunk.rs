// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-relative durations.
//!
//! A [`TimeChunk`] is a bag of seven independent counters (seconds through
//! years). Unlike a [`chrono::TimeDelta`], a chunk has no fixed length: adding
//! `1 month` to an instant depends on the month it lands in, and adding
//! `1 day` across a daylight-saving transition is not 24 hours. The chunk only
//! becomes a concrete offset once it is applied through a
//! [`Calendar`](crate::Calendar).
//!
//! Fields are never normalized. `90 seconds` and `1 minute 30 seconds` are
//! different chunks, and equality compares field by field.

use crate::calendar::Calendar;
use crate::error::{CalendarError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const SECONDS_PER_MINUTE: i128 = 60;
const MINUTES_PER_HOUR: i128 = 60;
const HOURS_PER_DAY: i128 = 24;
const DAYS_PER_WEEK: i128 = 7;
const DAYS_PER_YEAR: i128 = 365;
const WEEKS_PER_YEAR: i128 = 52;

// ═══════════════════════════════════════════════════════════════════════════
// TimeUnit
// ═══════════════════════════════════════════════════════════════════════════

/// Target units for [`TimeChunk::to`].
///
/// Months are deliberately absent: they have no length outside a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Years,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Years => "years",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        };
        f.write_str(label)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeChunk
// ═══════════════════════════════════════════════════════════════════════════

/// An unnormalized, calendar-relative duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeChunk {
    pub seconds: i64,
    pub minutes: i64,
    pub hours: i64,
    pub days: i64,
    pub weeks: i64,
    pub months: i64,
    pub years: i64,
}

impl TimeChunk {
    /// The all-zero chunk.
    pub const ZERO: Self = Self::new(0, 0, 0, 0, 0, 0, 0);

    // ── constructors ──────────────────────────────────────────────────

    /// Creates a chunk from all seven fields, smallest unit first.
    #[inline]
    pub const fn new(
        seconds: i64,
        minutes: i64,
        hours: i64,
        days: i64,
        weeks: i64,
        months: i64,
        years: i64,
    ) -> Self {
        Self {
            seconds,
            minutes,
            hours,
            days,
            weeks,
            months,
            years,
        }
    }

    #[inline]
    pub const fn from_seconds(seconds: i64) -> Self {
        Self::new(seconds, 0, 0, 0, 0, 0, 0)
    }

    #[inline]
    pub const fn from_minutes(minutes: i64) -> Self {
        Self::new(0, minutes, 0, 0, 0, 0, 0)
    }

    #[inline]
    pub const fn from_hours(hours: i64) -> Self {
        Self::new(0, 0, hours, 0, 0, 0, 0)
    }

    #[inline]
    pub const fn from_days(days: i64) -> Self {
        Self::new(0, 0, 0, days, 0, 0, 0)
    }

    #[inline]
    pub const fn from_weeks(weeks: i64) -> Self {
        Self::new(0, 0, 0, 0, weeks, 0, 0)
    }

    #[inline]
    pub const fn from_months(months: i64) -> Self {
        Self::new(0, 0, 0, 0, 0, months, 0)
    }

    #[inline]
    pub const fn from_years(years: i64) -> Self {
        Self::new(0, 0, 0, 0, 0, 0, years)
    }

    /// True when every field is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
            && self.minutes == 0
            && self.hours == 0
            && self.days == 0
            && self.weeks == 0
            && self.months == 0
            && self.years == 0
    }

    // ── conversion ────────────────────────────────────────────────────

    /// Flattens the chunk into a single unit.
    ///
    /// This is an approximation for display and bucketing, not date math:
    /// a year is taken as 365 days (52 weeks when converting to weeks) and
    /// every partial smaller unit is truncated on the way up. For example
    /// `TimeChunk::from_days(456).to(TimeUnit::Years)` is `1`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnsupportedConversion`] when `months` is
    /// non-zero. Totals beyond the `i64` range saturate at `i64::MIN` or
    /// `i64::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempoch_calendar::{TimeChunk, TimeUnit};
    ///
    /// let chunk = TimeChunk::from_days(400);
    /// assert_eq!(chunk.to(TimeUnit::Years), Ok(1));
    /// assert!(TimeChunk::from_months(1).to(TimeUnit::Years).is_err());
    /// ```
    pub fn to(&self, unit: TimeUnit) -> Result<i64> {
        if self.months != 0 {
            tracing::warn!(
                months = self.months,
                %unit,
                "months are not supported for chunk conversion"
            );
            return Err(CalendarError::UnsupportedConversion {
                months: self.months,
                unit,
            });
        }

        // Widened so that any i64 fields fit; the result saturates.
        let [seconds, minutes, hours, days, weeks, years] =
            [self.seconds, self.minutes, self.hours, self.days, self.weeks, self.years].map(i128::from);

        let seconds_to_minutes = seconds / SECONDS_PER_MINUTE;
        let minutes_to_hours = (minutes + seconds_to_minutes) / MINUTES_PER_HOUR;
        let hours_to_days = (hours + minutes_to_hours) / HOURS_PER_DAY;
        let whole_days = days + weeks * DAYS_PER_WEEK + years * DAYS_PER_YEAR;

        let total = match unit {
            TimeUnit::Seconds => {
                seconds
                    + minutes * SECONDS_PER_MINUTE
                    + hours * MINUTES_PER_HOUR * SECONDS_PER_MINUTE
                    + whole_days * HOURS_PER_DAY * MINUTES_PER_HOUR * SECONDS_PER_MINUTE
            }
            TimeUnit::Minutes => {
                minutes
                    + seconds_to_minutes
                    + hours * MINUTES_PER_HOUR
                    + whole_days * HOURS_PER_DAY * MINUTES_PER_HOUR
            }
            TimeUnit::Hours => hours + minutes_to_hours + whole_days * HOURS_PER_DAY,
            TimeUnit::Days => hours_to_days + whole_days,
            TimeUnit::Weeks => weeks + (days + hours_to_days) / DAYS_PER_WEEK + years * WEEKS_PER_YEAR,
            TimeUnit::Years => years + (days + hours_to_days + weeks * DAYS_PER_WEEK) / DAYS_PER_YEAR,
        };
        Ok(saturate(total))
    }

    // ── instant creation ──────────────────────────────────────────────

    /// `instant` moved back by this chunk in the ambient calendar.
    pub fn earlier_than(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        Calendar::current().subtract(instant, self)
    }

    /// `instant` moved forward by this chunk in the ambient calendar.
    pub fn later_than(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        Calendar::current().add(instant, self)
    }

    /// The current instant moved back by this chunk.
    pub fn earlier(&self) -> DateTime<Utc> {
        self.earlier_than(Utc::now())
    }

    /// The current instant moved forward by this chunk.
    pub fn later(&self) -> DateTime<Utc> {
        self.later_than(Utc::now())
    }

    // ── lengthen / shorten ────────────────────────────────────────────

    /// Field-wise sum, returned as a new chunk.
    #[inline]
    pub const fn lengthened(&self, other: &TimeChunk) -> TimeChunk {
        TimeChunk::new(
            self.seconds + other.seconds,
            self.minutes + other.minutes,
            self.hours + other.hours,
            self.days + other.days,
            self.weeks + other.weeks,
            self.months + other.months,
            self.years + other.years,
        )
    }

    /// Field-wise difference, returned as a new chunk.
    #[inline]
    pub const fn shortened(&self, other: &TimeChunk) -> TimeChunk {
        self.lengthened(&other.negated())
    }

    /// In place, field-wise sum.
    #[inline]
    pub fn lengthen(&mut self, other: &TimeChunk) {
        *self = self.lengthened(other);
    }

    /// In place, field-wise difference.
    #[inline]
    pub fn shorten(&mut self, other: &TimeChunk) {
        *self = self.shortened(other);
    }

    /// Every field with its sign flipped.
    #[inline]
    pub const fn negated(&self) -> TimeChunk {
        TimeChunk::new(
            -self.seconds,
            -self.minutes,
            -self.hours,
            -self.days,
            -self.weeks,
            -self.months,
            -self.years,
        )
    }
}

fn saturate(total: i128) -> i64 {
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

impl fmt::Display for TimeChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}y {}mo {}w {}d {}h {}m {}s",
            self.years, self.months, self.weeks, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for TimeChunk {
    type Output = TimeChunk;
    #[inline]
    fn add(self, rhs: TimeChunk) -> Self::Output {
        self.lengthened(&rhs)
    }
}

impl AddAssign for TimeChunk {
    #[inline]
    fn add_assign(&mut self, rhs: TimeChunk) {
        self.lengthen(&rhs);
    }
}

impl Sub for TimeChunk {
    type Output = TimeChunk;
    #[inline]
    fn sub(self, rhs: TimeChunk) -> Self::Output {
        self.shortened(&rhs)
    }
}

impl SubAssign for TimeChunk {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeChunk) {
        self.shorten(&rhs);
    }
}

impl Neg for TimeChunk {
    type Output = TimeChunk;
    #[inline]
    fn neg(self) -> Self::Output {
        self.negated()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Integer shorthands
// ═══════════════════════════════════════════════════════════════════════════

/// Single-unit chunk builders on integers, so callers can write `5.days()`.
pub trait ChunkUnits {
    fn seconds(self) -> TimeChunk;
    fn minutes(self) -> TimeChunk;
    fn hours(self) -> TimeChunk;
    fn days(self) -> TimeChunk;
    fn weeks(self) -> TimeChunk;
    fn months(self) -> TimeChunk;
    fn years(self) -> TimeChunk;
}

impl ChunkUnits for i64 {
    #[inline]
    fn seconds(self) -> TimeChunk {
        TimeChunk::from_seconds(self)
    }
    #[inline]
    fn minutes(self) -> TimeChunk {
        TimeChunk::from_minutes(self)
    }
    #[inline]
    fn hours(self) -> TimeChunk {
        TimeChunk::from_hours(self)
    }
    #[inline]
    fn days(self) -> TimeChunk {
        TimeChunk::from_days(self)
    }
    #[inline]
    fn weeks(self) -> TimeChunk {
        TimeChunk::from_weeks(self)
    }
    #[inline]
    fn months(self) -> TimeChunk {
        TimeChunk::from_months(self)
    }
    #[inline]
    fn years(self) -> TimeChunk {
        TimeChunk::from_years(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        assert_eq!(TimeChunk::default(), TimeChunk::ZERO);
        assert!(TimeChunk::default().is_zero());
        assert!(!1.seconds().is_zero());
    }

    #[test]
    fn test_integer_shorthands() {
        assert_eq!(5.days(), TimeChunk::new(0, 0, 0, 5, 0, 0, 0));
        assert_eq!(3i64.weeks().weeks, 3);
        assert_eq!(2.years().years, 2);
        assert_eq!(7.months().months, 7);
    }

    #[test]
    fn test_equality_is_fieldwise() {
        let ninety_seconds = 90.seconds();
        let minute_and_a_half = 1.minutes() + 30.seconds();
        assert_ne!(ninety_seconds, minute_and_a_half);
        assert_eq!(
            ninety_seconds.to(TimeUnit::Seconds),
            minute_and_a_half.to(TimeUnit::Seconds)
        );
    }

    #[test]
    fn test_add_sub_neg() {
        let a = TimeChunk::new(1, 2, 3, 4, 5, 6, 7);
        let b = TimeChunk::new(7, 6, 5, 4, 3, 2, 1);
        assert_eq!(a + b, TimeChunk::new(8, 8, 8, 8, 8, 8, 8));
        assert_eq!((a + b) - b, a);
        assert_eq!(-(-a), a);
        assert!((a + (-a)).is_zero());
    }

    #[test]
    fn test_in_place_lengthen_shorten() {
        let mut chunk = 2.hours();
        chunk.lengthen(&30.minutes());
        assert_eq!(chunk, TimeChunk::new(0, 30, 2, 0, 0, 0, 0));
        chunk.shorten(&2.hours());
        assert_eq!(chunk, 30.minutes());

        let mut assigned = 1.days();
        assigned += 1.days();
        assigned -= 3.days();
        assert_eq!(assigned, TimeChunk::from_days(-1));
    }

    #[test]
    fn test_to_years_truncates() {
        assert_eq!(400.days().to(TimeUnit::Years), Ok(1));
        assert_eq!(456.days().to(TimeUnit::Years), Ok(1));
        assert_eq!(364.days().to(TimeUnit::Years), Ok(0));
        assert_eq!((2.years() + 53.weeks()).to(TimeUnit::Years), Ok(3));
    }

    #[test]
    fn test_to_months_is_rejected() {
        let err = 1.months().to(TimeUnit::Years).unwrap_err();
        assert_eq!(
            err,
            CalendarError::UnsupportedConversion {
                months: 1,
                unit: TimeUnit::Years
            }
        );
        assert!(err.to_string().contains("1 month(s)"));
    }

    #[test]
    fn test_to_smaller_units() {
        let chunk = TimeChunk::new(30, 1, 1, 1, 1, 0, 0);
        assert_eq!(chunk.to(TimeUnit::Seconds), Ok(30 + 60 + 3_600 + 8 * 86_400));
        assert_eq!(chunk.to(TimeUnit::Minutes), Ok(1 + 60 + 8 * 1_440));
        assert_eq!(chunk.to(TimeUnit::Hours), Ok(1 + 8 * 24));
        assert_eq!(chunk.to(TimeUnit::Days), Ok(8));
        assert_eq!(chunk.to(TimeUnit::Weeks), Ok(1));
        assert_eq!(1.years().to(TimeUnit::Weeks), Ok(52));
    }

    #[test]
    fn test_carry_through_partial_units() {
        // 59 minutes + 60 seconds is one whole hour once carried.
        let chunk = 59.minutes() + 60.seconds();
        assert_eq!(chunk.to(TimeUnit::Hours), Ok(1));
        assert_eq!((23.hours() + chunk).to(TimeUnit::Days), Ok(1));
    }

    #[test]
    fn test_huge_totals_saturate() {
        let big = TimeChunk::from_years(i64::MAX / 1_000);
        assert_eq!(big.to(TimeUnit::Seconds), Ok(i64::MAX));
        assert_eq!((-big).to(TimeUnit::Minutes), Ok(i64::MIN));
        assert_eq!(big.to(TimeUnit::Years), Ok(i64::MAX / 1_000));

        let carried = TimeChunk::new(i64::MAX, i64::MAX, 0, 0, 0, 0, 0);
        assert_eq!(carried.to(TimeUnit::Hours), Ok(i64::MAX / 60 + i64::MAX / 3_600));
    }

    #[test]
    fn test_display() {
        let s = TimeChunk::new(1, 2, 3, 4, 0, 5, 6).to_string();
        assert_eq!(s, "6y 5mo 0w 4d 3h 2m 1s");
    }
}
