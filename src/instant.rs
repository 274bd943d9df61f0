// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ambient-calendar conveniences on instants.
//!
//! An [`Instant`] is a plain `chrono::DateTime<Utc>`. Every calendar
//! question about it goes through a [`Calendar`]; the [`InstantExt`]
//! methods resolve [`Calendar::current`] at call time and delegate, so
//!
//! ```text
//! instant.start_of(CalendarUnit::Day)
//! ```
//!
//! is shorthand for `Calendar::current().start_of(instant, CalendarUnit::Day)`.
//! Use the `Calendar` methods directly when the timezone must be pinned.

use crate::calendar::{Calendar, CalendarComponent, CalendarUnit};
use crate::chunk::TimeChunk;
use crate::error::Result;
use crate::manipulation::DateField;
use crate::time_ago::{English, TimeAgoOptions};
use chrono::{DateTime, Utc};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A point on the UTC time line.
pub type Instant = DateTime<Utc>;

// ═══════════════════════════════════════════════════════════════════════════
// InstantExt trait
// ═══════════════════════════════════════════════════════════════════════════

/// Calendar operations for types that represent a point in time.
///
/// Implementors only provide the UTC conversions; everything else is
/// evaluated in the ambient calendar.
pub trait InstantExt: Copy + PartialOrd + Sized {
    /// This value as a UTC instant.
    fn as_instant(&self) -> Instant;

    /// Build a value from a UTC instant.
    fn from_instant(instant: Instant) -> Self;

    // ── components ────────────────────────────────────────────────────

    fn component(&self, component: CalendarComponent) -> i64 {
        Calendar::current().component(self.as_instant(), component)
    }

    fn days_in_month(&self) -> u32 {
        Calendar::current().days_in_month(self.as_instant())
    }

    fn is_in_leap_year(&self) -> bool {
        Calendar::current().is_in_leap_year(self.as_instant())
    }

    fn is_weekend(&self) -> bool {
        Calendar::current().is_weekend(self.as_instant())
    }

    fn is_today(&self) -> bool {
        Calendar::current().is_today(self.as_instant())
    }

    fn is_tomorrow(&self) -> bool {
        Calendar::current().is_tomorrow(self.as_instant())
    }

    fn is_yesterday(&self) -> bool {
        Calendar::current().is_yesterday(self.as_instant())
    }

    fn is_same_day(&self, other: &Self) -> bool {
        Calendar::current().is_same_day(self.as_instant(), other.as_instant())
    }

    /// Renders the instant in the ambient timezone with a strftime pattern.
    fn format_pattern(&self, pattern: &str) -> Result<String> {
        Calendar::current().format(self.as_instant(), pattern)
    }

    // ── manipulation ──────────────────────────────────────────────────

    fn add_chunk(&self, chunk: &TimeChunk) -> Self {
        Self::from_instant(Calendar::current().add(self.as_instant(), chunk))
    }

    fn subtract_chunk(&self, chunk: &TimeChunk) -> Self {
        Self::from_instant(Calendar::current().subtract(self.as_instant(), chunk))
    }

    fn start_of(&self, unit: CalendarUnit) -> Self {
        Self::from_instant(Calendar::current().start_of(self.as_instant(), unit))
    }

    fn end_of(&self, unit: CalendarUnit) -> Self {
        Self::from_instant(Calendar::current().end_of(self.as_instant(), unit))
    }

    fn with_field(&self, field: DateField, value: i64) -> Result<Self> {
        Calendar::current()
            .with_field(self.as_instant(), field, value)
            .map(Self::from_instant)
    }

    // ── ordering ──────────────────────────────────────────────────────

    /// The earlier of the two; `self` on a tie.
    fn earlier_date(&self, other: &Self) -> Self {
        if other < self {
            *other
        } else {
            *self
        }
    }

    /// The later of the two; `self` on a tie.
    fn later_date(&self, other: &Self) -> Self {
        if other > self {
            *other
        } else {
            *self
        }
    }

    fn is_earlier_than(&self, other: &Self) -> bool {
        self < other
    }

    fn is_earlier_than_or_equal(&self, other: &Self) -> bool {
        self <= other
    }

    fn is_later_than(&self, other: &Self) -> bool {
        self > other
    }

    fn is_later_than_or_equal(&self, other: &Self) -> bool {
        self >= other
    }

    // ── differences ───────────────────────────────────────────────────

    /// The chunk that carries `self` to `other`.
    fn chunk_between(&self, other: &Self) -> TimeChunk {
        Calendar::current().chunk_between(self.as_instant(), other.as_instant())
    }

    /// Signed whole `unit`s from `other` to `self`.
    fn difference(&self, other: &Self, unit: CalendarUnit) -> i64 {
        Calendar::current().difference(self.as_instant(), other.as_instant(), unit)
    }

    fn years_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Year)
    }

    fn months_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Month)
    }

    fn weeks_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Week)
    }

    fn days_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Day)
    }

    fn hours_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Hour)
    }

    fn minutes_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Minute)
    }

    fn seconds_from(&self, other: &Self) -> i64 {
        self.difference(other, CalendarUnit::Second)
    }

    /// Whole `unit`s `self` is before `other`, or zero.
    fn earlier_by(&self, other: &Self, unit: CalendarUnit) -> i64 {
        Calendar::current().earlier_by(self.as_instant(), other.as_instant(), unit)
    }

    /// Whole `unit`s `self` is after `other`, or zero.
    fn later_by(&self, other: &Self, unit: CalendarUnit) -> i64 {
        Calendar::current().later_by(self.as_instant(), other.as_instant(), unit)
    }

    fn years_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Year)
    }

    fn months_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Month)
    }

    fn weeks_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Week)
    }

    fn days_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Day)
    }

    fn hours_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Hour)
    }

    fn minutes_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Minute)
    }

    fn seconds_earlier_than(&self, other: &Self) -> i64 {
        self.earlier_by(other, CalendarUnit::Second)
    }

    fn years_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Year)
    }

    fn months_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Month)
    }

    fn weeks_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Week)
    }

    fn days_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Day)
    }

    fn hours_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Hour)
    }

    fn minutes_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Minute)
    }

    fn seconds_later_than(&self, other: &Self) -> i64 {
        self.later_by(other, CalendarUnit::Second)
    }

    /// Whole `unit`s from now until `self`; zero once it has passed.
    fn until(&self, unit: CalendarUnit) -> i64 {
        Calendar::current().until(self.as_instant(), Utc::now(), unit)
    }

    /// Whole `unit`s since `self`; zero if it is in the future.
    fn ago(&self, unit: CalendarUnit) -> i64 {
        Calendar::current().ago(self.as_instant(), Utc::now(), unit)
    }

    // ── time ago ──────────────────────────────────────────────────────

    /// English long phrase for the span between `self` and `other`.
    fn time_ago_since(&self, other: &Self, options: TimeAgoOptions) -> String {
        Calendar::current().time_ago(self.as_instant(), other.as_instant(), options, &English)
    }

    fn time_ago_since_now(&self, options: TimeAgoOptions) -> String {
        Calendar::current().time_ago(self.as_instant(), Utc::now(), options, &English)
    }

    /// English compact phrase for the span between `self` and `other`.
    fn short_time_ago_since(&self, other: &Self) -> String {
        Calendar::current().short_time_ago(self.as_instant(), other.as_instant(), &English)
    }

    fn short_time_ago_since_now(&self) -> String {
        Calendar::current().short_time_ago(self.as_instant(), Utc::now(), &English)
    }
}

impl InstantExt for DateTime<Utc> {
    #[inline]
    fn as_instant(&self) -> Instant {
        *self
    }

    #[inline]
    fn from_instant(instant: Instant) -> Self {
        instant
    }
}

// ── Chunk arithmetic ──────────────────────────────────────────────────────

impl Add<TimeChunk> for DateTime<Utc> {
    type Output = DateTime<Utc>;
    #[inline]
    fn add(self, rhs: TimeChunk) -> Self::Output {
        self.add_chunk(&rhs)
    }
}

impl AddAssign<TimeChunk> for DateTime<Utc> {
    #[inline]
    fn add_assign(&mut self, rhs: TimeChunk) {
        *self = self.add_chunk(&rhs);
    }
}

impl Sub<TimeChunk> for DateTime<Utc> {
    type Output = DateTime<Utc>;
    #[inline]
    fn sub(self, rhs: TimeChunk) -> Self::Output {
        self.subtract_chunk(&rhs)
    }
}

impl SubAssign<TimeChunk> for DateTime<Utc> {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeChunk) {
        *self = self.subtract_chunk(&rhs);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
