// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Human-readable "time ago" phrases.
//!
//! Phrases are produced as English format keys (`"%d years ago"`,
//! `"Yesterday"`, `"%dw"`) and handed to a [`Localizer`] for translation
//! before `%d` is substituted. Languages whose plural forms depend on the
//! number can mark the key with a plural variant prefix; see
//! [`PluralRule::Slavic`].

use crate::calendar::Calendar;
use crate::chunk::TimeChunk;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::HashMap;

/// Translation hook for time-ago phrases.
pub trait Localizer {
    /// Translates a format key. The default returns the key unchanged.
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(key)
    }

    /// Prefix inserted before the unit word for a given count.
    fn plural_variant(&self, _value: i64) -> &'static str {
        ""
    }
}

/// English phrases, no translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Localizer for English {}

/// Plural-variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PluralRule {
    /// No variants; every key is used as-is.
    #[default]
    None,
    /// East Slavic rules (Russian, Ukrainian): `""`, `"_"` or `"__"` depending
    /// on the last two digits.
    Slavic,
}

impl PluralRule {
    pub fn variant(self, value: i64) -> &'static str {
        match self {
            PluralRule::None => "",
            PluralRule::Slavic => {
                let xy = value.rem_euclid(100);
                let y = value.rem_euclid(10);
                if y == 0 || y > 4 || (xy > 10 && xy < 15) {
                    ""
                } else if y > 1 && y < 5 && (xy < 10 || xy > 20) {
                    "_"
                } else if y == 1 && xy != 11 {
                    "__"
                } else {
                    ""
                }
            }
        }
    }
}

/// Key-to-phrase table with a plural rule.
///
/// Missing keys fall back to the English key.
#[derive(Debug, Clone, Default)]
pub struct TableLocalizer {
    table: HashMap<String, String>,
    plural_rule: PluralRule,
}

impl TableLocalizer {
    pub fn new(plural_rule: PluralRule) -> Self {
        Self {
            table: HashMap::new(),
            plural_rule,
        }
    }

    pub fn with_entry(mut self, key: impl Into<String>, phrase: impl Into<String>) -> Self {
        self.table.insert(key.into(), phrase.into());
        self
    }
}

impl Localizer for TableLocalizer {
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.table.get(key) {
            Some(phrase) => Cow::Borrowed(phrase.as_str()),
            None => Cow::Borrowed(key),
        }
    }

    fn plural_variant(&self, value: i64) -> &'static str {
        self.plural_rule.variant(value)
    }
}

/// Choice between worded and numeric phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeAgoOptions {
    /// `"1 year ago"` instead of `"Last year"` (also months, weeks, days).
    pub numeric_dates: bool,
    /// `"1 hour ago"` instead of `"An hour ago"` (also minutes, seconds).
    pub numeric_times: bool,
}

impl Calendar {
    /// Long phrase for the span between `instant` and `since`.
    ///
    /// The order of the two instants does not matter.
    ///
    /// ```
    /// use tempoch_calendar::{Calendar, English, TimeAgoOptions};
    ///
    /// let cal = Calendar::UTC;
    /// let now = cal.date_time(2024, 6, 10, 12, 0, 0).unwrap();
    /// let then = cal.date_time(2024, 6, 9, 20, 0, 0).unwrap();
    /// let text = cal.time_ago(then, now, TimeAgoOptions::default(), &English);
    /// assert_eq!(text, "Yesterday");
    /// ```
    pub fn time_ago<L: Localizer + ?Sized>(
        &self,
        instant: DateTime<Utc>,
        since: DateTime<Utc>,
        options: TimeAgoOptions,
        localizer: &L,
    ) -> String {
        let (earliest, latest) = ordered(instant, since);
        let parts = self.breakdown(earliest, latest, true);
        let yesterday = self.is_yesterday_relative(instant, since);
        let phrase = Phrase { localizer };

        if parts.years >= 2 {
            return phrase.counted("years ago", " ", parts.years);
        }
        if parts.years >= 1 {
            return phrase.single(options.numeric_dates, "1 year ago", "Last year");
        }
        if parts.months >= 2 {
            return phrase.counted("months ago", " ", parts.months);
        }
        if parts.months >= 1 {
            return phrase.single(options.numeric_dates, "1 month ago", "Last month");
        }
        if parts.weeks >= 2 {
            return phrase.counted("weeks ago", " ", parts.weeks);
        }
        if parts.weeks >= 1 {
            return phrase.single(options.numeric_dates, "1 week ago", "Last week");
        }
        if parts.days >= 2 {
            return phrase.counted("days ago", " ", parts.days);
        }
        if parts.days >= 1 || yesterday {
            // A full day that spans two date changes is not "Yesterday".
            return phrase.single(options.numeric_dates || !yesterday, "1 day ago", "Yesterday");
        }
        if parts.hours >= 2 {
            return phrase.counted("hours ago", " ", parts.hours);
        }
        if parts.hours >= 1 {
            return phrase.single(options.numeric_times, "1 hour ago", "An hour ago");
        }
        if parts.minutes >= 2 {
            return phrase.counted("minutes ago", " ", parts.minutes);
        }
        if parts.minutes >= 1 {
            return phrase.single(options.numeric_times, "1 minute ago", "A minute ago");
        }
        if parts.seconds >= 3 {
            return phrase.counted("seconds ago", " ", parts.seconds);
        }
        phrase.single(options.numeric_times, "1 second ago", "Just now")
    }

    /// Compact phrase (`"3w"`, `"1d"`, `"45s"`) for the span between
    /// `instant` and `since`.
    pub fn short_time_ago<L: Localizer + ?Sized>(
        &self,
        instant: DateTime<Utc>,
        since: DateTime<Utc>,
        localizer: &L,
    ) -> String {
        let (earliest, latest) = ordered(instant, since);
        let parts = self.breakdown(earliest, latest, true);
        let phrase = Phrase { localizer };

        if parts.years >= 1 {
            phrase.counted("y", "", parts.years)
        } else if parts.months >= 1 {
            phrase.counted("M", "", parts.months)
        } else if parts.weeks >= 1 {
            phrase.counted("w", "", parts.weeks)
        } else if parts.days >= 2 {
            phrase.counted("d", "", parts.days)
        } else if parts.days >= 1 || self.is_yesterday_relative(instant, since) {
            phrase.counted("d", "", 1)
        } else if parts.hours >= 1 {
            phrase.counted("h", "", parts.hours)
        } else if parts.minutes >= 1 {
            phrase.counted("m", "", parts.minutes)
        } else {
            phrase.counted("s", "", parts.seconds)
        }
    }

    /// `instant` falls on the local day before `since`.
    fn is_yesterday_relative(&self, instant: DateTime<Utc>, since: DateTime<Utc>) -> bool {
        self.checked_subtract(since, &TimeChunk::from_days(1))
            .is_some_and(|day_before| self.is_same_day(day_before, instant))
    }
}

fn ordered(a: DateTime<Utc>, b: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

struct Phrase<'l, L: ?Sized> {
    localizer: &'l L,
}

impl<L: Localizer + ?Sized> Phrase<'_, L> {
    /// `"%d" + separator + variant + unit`, translated, then `%d` filled in.
    fn counted(&self, unit: &str, separator: &str, value: i64) -> String {
        let variant = self.localizer.plural_variant(value);
        let key = format!("%d{separator}{variant}{unit}");
        self.localizer
            .translate(&key)
            .replace("%d", &value.to_string())
    }

    fn single(&self, numeric: bool, numeric_key: &str, worded_key: &str) -> String {
        let key = if numeric { numeric_key } else { worded_key };
        self.localizer.translate(key).into_owned()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
