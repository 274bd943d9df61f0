// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar Module
//!
//! This crate provides calendar-aware time arithmetic and time-period
//! algebra on top of `chrono`.
//!
//! # Core types
//!
//! - [`TimeChunk`]: an unnormalized bundle of calendar units (1 year and
//!   400 days stays 1 year and 400 days until it is applied to an instant).
//! - [`Calendar`]: a timezone plus a week-start rule; every calendar
//!   question about an instant is answered here.
//! - [`Instant`]: alias for `chrono::DateTime<Utc>`; [`InstantExt`] adds
//!   ambient-calendar shorthands to it.
//! - [`TimePeriod`]: a pair of optional instants; a missing bound is open.
//! - [`TimeSpan`]: trait for anything with a beginning and an end, carrying
//!   the relation and containment algebra.
//! - [`TimePeriodCollection`]: periods that may overlap, in insertion order.
//! - [`TimePeriodChain`]: closed periods laid back to back.
//!
//! # Ambient calendar
//!
//! Operations that do not take a [`Calendar`] use [`Calendar::current`],
//! resolved in this order:
//!
//! | Source | Effect |
//! |--------|--------|
//! | [`Calendar::set_current`] | process-wide override |
//! | `TZ` | IANA timezone name |
//! | `TEMPOCH_WEEK_START` | `monday` or `sunday` |
//! | fallback | UTC, weeks starting on Monday |
//!
//! # Period relations
//!
//! [`TimeSpan::relation`] classifies two periods into one of the fourteen
//! [`Relation`] variants. Overlap, containment, and gap queries are derived
//! from it.
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use tempoch_calendar::{Relation, TimePeriod, TimeSpan};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
//! let outer = TimePeriod::starting_at(t0, TimeDelta::hours(2));
//! let inner = TimePeriod::closed(t0 + TimeDelta::hours(1), t0 + TimeDelta::hours(2));
//!
//! assert_eq!(inner.relation(&outer), Relation::EndInside);
//! assert!(inner.overlaps(&outer));
//! assert_eq!(inner.gap(&outer), TimeDelta::zero());
//! ```

mod calendar;
mod chain;
mod chunk;
mod collection;
mod comparison;
mod error;
mod group;
mod instant;
mod manipulation;
mod period;
mod time_ago;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{Calendar, CalendarComponent, CalendarUnit, WeekStartDay, TZ_VAR, WEEK_START_VAR};
pub use chain::TimePeriodChain;
pub use chunk::{ChunkUnits, TimeChunk, TimeUnit};
pub use collection::TimePeriodCollection;
pub use error::{CalendarError, Result};
pub use group::TimePeriodGroup;
pub use instant::{Instant, InstantExt};
pub use manipulation::DateField;
pub use period::{Anchor, IntervalKind, Relation, TimePeriod, TimeSpan};
pub use time_ago::{English, Localizer, PluralRule, TableLocalizer, TimeAgoOptions};

// ── Third-party re-exports ────────────────────────────────────────────────

/// Timezone type used by [`Calendar`].
pub use chrono_tz::Tz;
