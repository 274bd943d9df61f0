// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar configuration and component extraction.
//!
//! A [`Calendar`] is the lens through which a UTC [`Instant`](crate::Instant)
//! is read as civil date and time: it pins a timezone and a week-numbering
//! convention on the proleptic Gregorian calendar. Every component query and
//! every chunk application takes a calendar explicitly.
//!
//! # Ambient calendar
//!
//! [`Calendar::current`] is resolved at call time, never cached on the
//! instant. Resolution order:
//!
//! 1. an override installed with [`Calendar::set_current`],
//! 2. the process environment (`TZ`, `TEMPOCH_WEEK_START`),
//! 3. [`Calendar::UTC`].
//!
//! The same instant can therefore report different components if the
//! override or the environment changes between two calls.

use crate::error::{CalendarError, Result};
use chrono::{
    DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
    Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use std::fmt::{self, Write as _};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable holding the IANA timezone name.
pub const TZ_VAR: &str = "TZ";

/// Environment variable selecting the first day of the week.
pub const WEEK_START_VAR: &str = "TEMPOCH_WEEK_START";

static AMBIENT: RwLock<Option<Calendar>> = RwLock::new(None);

// ═══════════════════════════════════════════════════════════════════════════
// WeekStartDay
// ═══════════════════════════════════════════════════════════════════════════

/// Which day begins a week for week numbering and week truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WeekStartDay {
    /// ISO 8601 weeks (Monday first, week 1 holds the first Thursday).
    #[default]
    Monday,
    /// US convention (Sunday first, week 1 holds January 1st).
    Sunday,
}

impl WeekStartDay {
    /// How many days `weekday` is past the start of its week.
    pub(crate) fn days_from_start(self, weekday: Weekday) -> u32 {
        match self {
            WeekStartDay::Monday => weekday.num_days_from_monday(),
            WeekStartDay::Sunday => weekday.num_days_from_sunday(),
        }
    }
}

impl FromStr for WeekStartDay {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" | "iso" => Ok(WeekStartDay::Monday),
            "sunday" | "sun" | "us" => Ok(WeekStartDay::Sunday),
            other => Err(CalendarError::InvalidConfig(format!(
                "{WEEK_START_VAR}='{other}' (expected 'monday' or 'sunday')"
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarComponent / CalendarUnit
// ═══════════════════════════════════════════════════════════════════════════

/// A field that can be read from an instant through a [`Calendar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarComponent {
    /// `1` for the common era, `0` before it.
    Era,
    Year,
    /// `1..=4`.
    Quarter,
    Month,
    WeekOfYear,
    WeekOfMonth,
    /// The year the week-of-year number belongs to (differs from `Year`
    /// around New Year).
    YearForWeekOfYear,
    Day,
    /// `1` = Sunday … `7` = Saturday.
    Weekday,
    /// Which occurrence of this weekday within the month (`1..=5`).
    WeekdayOrdinal,
    Hour,
    Minute,
    Second,
    Nanosecond,
}

/// Calendar units used for truncation and for single-unit differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalendarUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CalendarUnit::Year => "year",
            CalendarUnit::Month => "month",
            CalendarUnit::Week => "week",
            CalendarUnit::Day => "day",
            CalendarUnit::Hour => "hour",
            CalendarUnit::Minute => "minute",
            CalendarUnit::Second => "second",
        };
        f.write_str(label)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar
// ═══════════════════════════════════════════════════════════════════════════

/// Proleptic Gregorian calendar bound to a timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    timezone: Tz,
    week_start: WeekStartDay,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::UTC
    }
}

impl Calendar {
    /// UTC with ISO weeks.
    pub const UTC: Self = Self::new(Tz::UTC);

    // ── configuration ─────────────────────────────────────────────────

    #[inline]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            week_start: WeekStartDay::Monday,
        }
    }

    #[inline]
    pub const fn with_week_start(mut self, week_start: WeekStartDay) -> Self {
        self.week_start = week_start;
        self
    }

    #[inline]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[inline]
    pub const fn week_start(&self) -> WeekStartDay {
        self.week_start
    }

    /// Builds a calendar from the process environment.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidTimezone`] for an unknown `TZ` name and
    /// [`CalendarError::InvalidConfig`] for an unknown week start.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a calendar from an arbitrary key lookup.
    ///
    /// Unset or blank keys keep the [`Calendar::UTC`] defaults. A leading `:`
    /// on the timezone (POSIX `TZ=:Europe/Paris` form) is accepted.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, WeekStartDay};
    ///
    /// let cal = Calendar::from_lookup(|key| match key {
    ///     "TZ" => Some("Europe/Madrid".to_string()),
    ///     "TEMPOCH_WEEK_START" => Some("sunday".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(cal.timezone(), chrono_tz::Europe::Madrid);
    /// assert_eq!(cal.week_start(), WeekStartDay::Sunday);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut calendar = Calendar::UTC;

        if let Some(raw) = lookup(TZ_VAR).filter(|v| !v.trim().is_empty()) {
            let name = raw.trim().trim_start_matches(':');
            calendar.timezone = parse_timezone(name)?;
        }
        if let Some(raw) = lookup(WEEK_START_VAR).filter(|v| !v.trim().is_empty()) {
            calendar.week_start = raw.parse()?;
        }
        Ok(calendar)
    }

    // ── ambient calendar ──────────────────────────────────────────────

    /// The ambient calendar, resolved now.
    pub fn current() -> Self {
        let installed = *AMBIENT.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(calendar) = installed {
            tracing::trace!(timezone = %calendar.timezone, "using installed calendar");
            return calendar;
        }
        match Self::from_env() {
            Ok(calendar) => calendar,
            Err(err) => {
                tracing::debug!(%err, "ignoring calendar environment, falling back to UTC");
                Calendar::UTC
            }
        }
    }

    /// Installs a process-wide calendar that wins over the environment.
    pub fn set_current(calendar: Calendar) {
        *AMBIENT.write().unwrap_or_else(PoisonError::into_inner) = Some(calendar);
    }

    /// Removes the installed calendar, returning to environment resolution.
    pub fn reset_current() {
        *AMBIENT.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    // ── instant construction ──────────────────────────────────────────

    /// Local midnight of the given date.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidCalendarDate`] if the date does not exist
    /// (e.g. February 30th).
    pub fn date(&self, year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
        self.date_time(year, month, day, 0, 0, 0)
    }

    /// The instant at the given local wall-clock time.
    ///
    /// Wall-clock times skipped by a daylight-saving jump resolve forward
    /// past the gap; repeated times resolve to their first occurrence.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidCalendarDate`] if any field is out of range.
    pub fn date_time(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<DateTime<Utc>> {
        let invalid = || {
            CalendarError::InvalidCalendarDate(format!(
                "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
            ))
        };
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(invalid)?;
        self.resolve_local(naive).ok_or_else(invalid)
    }

    /// Parses `text` with a strftime-style `format`.
    ///
    /// Formats carrying an offset (`%z`, `%:z`) are honoured as written;
    /// otherwise the text is read as wall-clock time in this calendar's
    /// timezone. Date-only formats resolve to local midnight.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidCalendarDate`] if the text does not match the
    /// format or names a date that does not exist.
    pub fn parse(&self, text: &str, format: &str) -> Result<DateTime<Utc>> {
        if let Ok(with_offset) = DateTime::parse_from_str(text, format) {
            return Ok(with_offset.with_timezone(&Utc));
        }
        let naive = NaiveDateTime::parse_from_str(text, format)
            .or_else(|_| {
                NaiveDate::parse_from_str(text, format).map(|date| date.and_time(NaiveTime::MIN))
            })
            .map_err(|e| {
                CalendarError::InvalidCalendarDate(format!("'{text}' with format '{format}': {e}"))
            })?;
        self.resolve_local(naive).ok_or_else(|| {
            CalendarError::InvalidCalendarDate(format!("'{text}' is out of range"))
        })
    }

    /// Renders `instant` in this calendar's timezone with a strftime pattern.
    ///
    /// # Errors
    ///
    /// [`CalendarError::InvalidFormat`] if the pattern has an unknown specifier.
    pub fn format(&self, instant: DateTime<Utc>, pattern: &str) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", self.local(instant).format(pattern))
            .map_err(|_| CalendarError::InvalidFormat(pattern.to_string()))?;
        Ok(out)
    }

    // ── local time ────────────────────────────────────────────────────

    /// `instant` as seen in this calendar's timezone.
    #[inline]
    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.timezone)
    }

    #[inline]
    pub(crate) fn naive_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        self.local(instant).naive_local()
    }

    /// Maps a wall-clock time back to an instant.
    ///
    /// Ambiguous times take the earlier instant. Nonexistent times are read
    /// with the offset in force a day before, which lands just past the gap.
    pub(crate) fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        if let Some(local) = self.timezone.from_local_datetime(&naive).earliest() {
            return Some(local.with_timezone(&Utc));
        }
        let before = naive.checked_sub_signed(TimeDelta::days(1))?;
        let offset = self.timezone.offset_from_utc_datetime(&before).fix();
        naive
            .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))
            .map(|utc| utc.and_utc())
    }

    // ── components ────────────────────────────────────────────────────

    /// Reads one calendar field of `instant`.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, CalendarComponent};
    ///
    /// let cal = Calendar::UTC;
    /// let instant = cal.date_time(2024, 3, 17, 13, 45, 30).unwrap();
    /// assert_eq!(cal.component(instant, CalendarComponent::Quarter), 1);
    /// assert_eq!(cal.component(instant, CalendarComponent::Weekday), 1); // Sunday
    /// ```
    pub fn component(&self, instant: DateTime<Utc>, component: CalendarComponent) -> i64 {
        let local = self.naive_local(instant);
        let date = local.date();
        match component {
            CalendarComponent::Era => i64::from(date.year_ce().0),
            CalendarComponent::Year => i64::from(date.year()),
            CalendarComponent::Quarter => i64::from((date.month() - 1) / 3 + 1),
            CalendarComponent::Month => i64::from(date.month()),
            CalendarComponent::WeekOfYear => i64::from(self.week_of_year(date).1),
            CalendarComponent::WeekOfMonth => {
                let first = date.with_day(1).unwrap_or(date);
                let lead = self.week_start.days_from_start(first.weekday());
                i64::from((date.day0() + lead) / 7 + 1)
            }
            CalendarComponent::YearForWeekOfYear => i64::from(self.week_of_year(date).0),
            CalendarComponent::Day => i64::from(date.day()),
            CalendarComponent::Weekday => i64::from(date.weekday().number_from_sunday()),
            CalendarComponent::WeekdayOrdinal => i64::from(date.day0() / 7 + 1),
            CalendarComponent::Hour => i64::from(local.hour()),
            CalendarComponent::Minute => i64::from(local.minute()),
            CalendarComponent::Second => i64::from(local.second()),
            CalendarComponent::Nanosecond => i64::from(local.nanosecond()),
        }
    }

    /// `(year, week)` under this calendar's week convention.
    fn week_of_year(&self, date: NaiveDate) -> (i32, u32) {
        match self.week_start {
            WeekStartDay::Monday => {
                let iso = date.iso_week();
                (iso.year(), iso.week())
            }
            WeekStartDay::Sunday => {
                let lead = WeekStartDay::Sunday.days_from_start(date.weekday());
                let week_end = date
                    .checked_add_days(chrono::Days::new(u64::from(6 - lead)))
                    .unwrap_or(date);
                if week_end.year() > date.year() {
                    return (date.year() + 1, 1);
                }
                let jan1_lead = NaiveDate::from_ymd_opt(date.year(), 1, 1)
                    .map(|jan1| WeekStartDay::Sunday.days_from_start(jan1.weekday()))
                    .unwrap_or(0);
                (date.year(), (date.ordinal0() + jan1_lead) / 7 + 1)
            }
        }
    }

    /// Number of days in the month containing `instant`.
    pub fn days_in_month(&self, instant: DateTime<Utc>) -> u32 {
        let date = self.naive_local(instant).date();
        days_in_month(date.year(), date.month())
    }

    pub fn is_in_leap_year(&self, instant: DateTime<Utc>) -> bool {
        is_leap_year(self.naive_local(instant).year())
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self, instant: DateTime<Utc>) -> bool {
        matches!(
            self.naive_local(instant).weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }

    /// Whether `instant` falls on the same local day as `now`.
    pub fn is_today_at(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.naive_local(instant).date() == self.naive_local(now).date()
    }

    /// Whether `instant` falls on the local day after `now`.
    pub fn is_tomorrow_at(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.naive_local(now).date().succ_opt() == Some(self.naive_local(instant).date())
    }

    /// Whether `instant` falls on the local day before `now`.
    pub fn is_yesterday_at(&self, instant: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.naive_local(now).date().pred_opt() == Some(self.naive_local(instant).date())
    }

    pub fn is_today(&self, instant: DateTime<Utc>) -> bool {
        self.is_today_at(instant, Utc::now())
    }

    pub fn is_tomorrow(&self, instant: DateTime<Utc>) -> bool {
        self.is_tomorrow_at(instant, Utc::now())
    }

    pub fn is_yesterday(&self, instant: DateTime<Utc>) -> bool {
        self.is_yesterday_at(instant, Utc::now())
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::InvalidTimezone(format!("'{name}'")))
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
