// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar arithmetic: applying chunks, truncating to unit boundaries and
//! replacing individual fields.
//!
//! Chunks are applied in two stages. The date part (years, months, weeks,
//! days) moves the local wall-clock date, so `1 day` keeps the time of day
//! across a daylight-saving change. The time part (hours, minutes, seconds)
//! is then added as elapsed time. Month arithmetic clamps to the last day of
//! the target month: January 31st plus one month is the end of February.

use crate::calendar::{Calendar, CalendarUnit};
use crate::chunk::TimeChunk;
use crate::error::{CalendarError, Result};
use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, Timelike,
    Utc,
};

const OUT_OF_RANGE: &str = "instant out of chrono::DateTime<Utc> representable range";

/// A field that can be replaced with [`Calendar::with_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl Calendar {
    // ── chunk application ─────────────────────────────────────────────

    /// `instant` moved by `chunk`, or `None` past the representable range.
    pub fn checked_add(&self, instant: DateTime<Utc>, chunk: &TimeChunk) -> Option<DateTime<Utc>> {
        let months = chunk.years.checked_mul(12)?.checked_add(chunk.months)?;
        let days = chunk.weeks.checked_mul(7)?.checked_add(chunk.days)?;

        let base = if months == 0 && days == 0 {
            instant
        } else {
            let naive = shift_days(shift_months(self.naive_local(instant), months)?, days)?;
            self.resolve_local(naive)?
        };

        let seconds = chunk
            .hours
            .checked_mul(3_600)?
            .checked_add(chunk.minutes.checked_mul(60)?)?
            .checked_add(chunk.seconds)?;
        base.checked_add_signed(TimeDelta::try_seconds(seconds)?)
    }

    /// `instant` moved back by `chunk`, or `None` past the representable range.
    #[inline]
    pub fn checked_subtract(
        &self,
        instant: DateTime<Utc>,
        chunk: &TimeChunk,
    ) -> Option<DateTime<Utc>> {
        self.checked_add(instant, &chunk.negated())
    }

    /// `instant` moved by `chunk`.
    ///
    /// # Panics
    ///
    /// If the result is outside chrono's representable range. Use
    /// [`Calendar::checked_add`] for untrusted input.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, ChunkUnits};
    ///
    /// let cal = Calendar::UTC;
    /// let jan31 = cal.date(2024, 1, 31).unwrap();
    /// assert_eq!(cal.add(jan31, &1.months()), cal.date(2024, 2, 29).unwrap());
    /// ```
    pub fn add(&self, instant: DateTime<Utc>, chunk: &TimeChunk) -> DateTime<Utc> {
        self.checked_add(instant, chunk).expect(OUT_OF_RANGE)
    }

    /// `instant` moved back by `chunk`.
    ///
    /// # Panics
    ///
    /// If the result is outside chrono's representable range.
    pub fn subtract(&self, instant: DateTime<Utc>, chunk: &TimeChunk) -> DateTime<Utc> {
        self.checked_subtract(instant, chunk).expect(OUT_OF_RANGE)
    }

    // ── truncation ────────────────────────────────────────────────────

    /// The first instant of the `unit` containing `instant`.
    ///
    /// Weeks start on this calendar's [`week_start`](Calendar::week_start).
    pub fn checked_start_of(&self, instant: DateTime<Utc>, unit: CalendarUnit) -> Option<DateTime<Utc>> {
        let start = self.local_start_of(instant, unit)?;
        self.resolve_truncated(instant, start, unit)
    }

    /// The last millisecond of the `unit` containing `instant`.
    pub fn checked_end_of(&self, instant: DateTime<Utc>, unit: CalendarUnit) -> Option<DateTime<Utc>> {
        let start = self.local_start_of(instant, unit)?;
        let next = match unit {
            CalendarUnit::Year => start.checked_add_months(Months::new(12))?,
            CalendarUnit::Month => start.checked_add_months(Months::new(1))?,
            CalendarUnit::Week => start.checked_add_days(chrono::Days::new(7))?,
            CalendarUnit::Day => start.checked_add_days(chrono::Days::new(1))?,
            CalendarUnit::Hour => start.checked_add_signed(TimeDelta::hours(1))?,
            CalendarUnit::Minute => start.checked_add_signed(TimeDelta::minutes(1))?,
            CalendarUnit::Second => start.checked_add_signed(TimeDelta::seconds(1))?,
        };
        let last = next.checked_sub_signed(TimeDelta::milliseconds(1))?;
        self.resolve_truncated(instant, last, unit)
    }

    /// Panicking form of [`Calendar::checked_start_of`].
    ///
    /// # Panics
    ///
    /// If the result is outside chrono's representable range.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, CalendarUnit};
    ///
    /// let cal = Calendar::UTC;
    /// let instant = cal.date_time(2024, 3, 17, 13, 45, 30).unwrap();
    /// assert_eq!(cal.start_of(instant, CalendarUnit::Month), cal.date(2024, 3, 1).unwrap());
    /// ```
    pub fn start_of(&self, instant: DateTime<Utc>, unit: CalendarUnit) -> DateTime<Utc> {
        self.checked_start_of(instant, unit).expect(OUT_OF_RANGE)
    }

    /// Panicking form of [`Calendar::checked_end_of`].
    pub fn end_of(&self, instant: DateTime<Utc>, unit: CalendarUnit) -> DateTime<Utc> {
        self.checked_end_of(instant, unit).expect(OUT_OF_RANGE)
    }

    fn local_start_of(&self, instant: DateTime<Utc>, unit: CalendarUnit) -> Option<NaiveDateTime> {
        let local = self.naive_local(instant);
        let date = local.date();
        match unit {
            CalendarUnit::Year => {
                NaiveDate::from_ymd_opt(date.year(), 1, 1).map(|d| d.and_time(NaiveTime::MIN))
            }
            CalendarUnit::Month => date.with_day(1).map(|d| d.and_time(NaiveTime::MIN)),
            CalendarUnit::Week => {
                let lead = self.week_start().days_from_start(date.weekday());
                date.checked_sub_days(chrono::Days::new(u64::from(lead)))
                    .map(|d| d.and_time(NaiveTime::MIN))
            }
            CalendarUnit::Day => Some(date.and_time(NaiveTime::MIN)),
            CalendarUnit::Hour => date.and_hms_opt(local.hour(), 0, 0),
            CalendarUnit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0),
            CalendarUnit::Second => {
                date.and_hms_opt(local.hour(), local.minute(), local.second())
            }
        }
    }

    /// Sub-day boundaries keep the offset of the original instant so that
    /// truncating inside a repeated hour stays inside it.
    fn resolve_truncated(
        &self,
        instant: DateTime<Utc>,
        naive: NaiveDateTime,
        unit: CalendarUnit,
    ) -> Option<DateTime<Utc>> {
        match unit {
            CalendarUnit::Hour | CalendarUnit::Minute | CalendarUnit::Second => {
                let offset = self.local(instant).offset().fix().local_minus_utc();
                naive
                    .checked_sub_signed(TimeDelta::seconds(i64::from(offset)))
                    .map(|utc| utc.and_utc())
            }
            _ => self.resolve_local(naive),
        }
    }

    // ── field replacement ─────────────────────────────────────────────

    /// `instant` with one local field replaced; every other field is kept.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidCalendarDate`] if the replaced field makes the
    /// date invalid (e.g. day 31 in April).
    pub fn with_field(
        &self,
        instant: DateTime<Utc>,
        field: DateField,
        value: i64,
    ) -> Result<DateTime<Utc>> {
        let local = self.naive_local(instant);
        let invalid =
            || CalendarError::InvalidCalendarDate(format!("{field:?} = {value} applied to {local}"));

        let replaced = match field {
            DateField::Year => i32::try_from(value).ok().and_then(|y| local.with_year(y)),
            DateField::Month => u32::try_from(value).ok().and_then(|m| local.with_month(m)),
            DateField::Day => u32::try_from(value).ok().and_then(|d| local.with_day(d)),
            DateField::Hour => u32::try_from(value).ok().and_then(|h| local.with_hour(h)),
            DateField::Minute => u32::try_from(value).ok().and_then(|m| local.with_minute(m)),
            DateField::Second => u32::try_from(value).ok().and_then(|s| local.with_second(s)),
        }
        .ok_or_else(invalid)?;

        self.resolve_local(replaced).ok_or_else(invalid)
    }

    pub fn with_year(&self, instant: DateTime<Utc>, year: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Year, year)
    }

    pub fn with_month(&self, instant: DateTime<Utc>, month: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Month, month)
    }

    pub fn with_day(&self, instant: DateTime<Utc>, day: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Day, day)
    }

    pub fn with_hour(&self, instant: DateTime<Utc>, hour: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Hour, hour)
    }

    pub fn with_minute(&self, instant: DateTime<Utc>, minute: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Minute, minute)
    }

    pub fn with_second(&self, instant: DateTime<Utc>, second: i64) -> Result<DateTime<Utc>> {
        self.with_field(instant, DateField::Second, second)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────

pub(crate) fn shift_months(naive: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        naive.checked_add_months(magnitude)
    } else {
        naive.checked_sub_months(magnitude)
    }
}

pub(crate) fn shift_days(naive: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    let magnitude = chrono::Days::new(days.unsigned_abs());
    if days >= 0 {
        naive.checked_add_days(magnitude)
    } else {
        naive.checked_sub_days(magnitude)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
