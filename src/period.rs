// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time period implementation.
//!
//! This module provides:
//! - [`TimeSpan`]: anything with an optional beginning and end, plus the
//!   relationship, containment and gap queries every span supports
//! - [`TimePeriod`]: the concrete span stored by groups
//! - [`Relation`], [`IntervalKind`], [`Anchor`]
//!
//! Either bound may be absent, meaning the period is open on that side.
//! Queries that need both bounds degrade to [`Relation::None`], `false`, a
//! zero gap or a `MAX` sentinel instead of failing.

use crate::calendar::{Calendar, CalendarUnit};
use crate::chunk::TimeChunk;
use crate::error::{CalendarError, Result};
use chrono::{DateTime, TimeDelta, Utc};
use qtty::{Days, Seconds};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const OUT_OF_RANGE: &str = "period bound out of chrono::DateTime<Utc> representable range";

// ═══════════════════════════════════════════════════════════════════════════
// Relation / IntervalKind / Anchor
// ═══════════════════════════════════════════════════════════════════════════

/// How a period sits relative to another one.
///
/// Read `a.relation(&b)` as "`a` is … `b`": [`Relation::After`] means `b`
/// ends before `a` begins, [`Relation::Inside`] means `b` strictly encloses
/// `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Relation {
    /// The other period ends before this one begins.
    After,
    /// The other period ends exactly where this one begins.
    StartTouching,
    /// The other period begins earlier and ends inside this one.
    StartInside,
    /// Same beginning; the other period ends later.
    InsideStartTouching,
    /// Same beginning; the other period ends earlier.
    EnclosingStartTouching,
    /// The other period lies strictly inside this one.
    Enclosing,
    /// Same end; the other period begins later.
    EnclosingEndTouching,
    ExactMatch,
    /// This period lies strictly inside the other one.
    Inside,
    /// Same end; the other period begins earlier.
    InsideEndTouching,
    /// The other period begins inside this one and ends later.
    EndInside,
    /// The other period begins exactly where this one ends.
    EndTouching,
    /// The other period begins after this one ends.
    Before,
    /// A bound is missing or a period is not strictly increasing.
    None,
}

/// Whether boundary instants count as contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntervalKind {
    Open,
    #[default]
    Closed,
}

/// The fixed point of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Anchor {
    /// Hold the beginning, move the end.
    #[default]
    Beginning,
    /// Move both bounds by half the change.
    Center,
    /// Hold the end, move the beginning.
    End,
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeSpan trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that cover a stretch of time.
///
/// Implementors provide the two bounds; every query below is derived from
/// them. Groups store spans as [`TimePeriod`] values copied on insertion.
pub trait TimeSpan {
    fn beginning(&self) -> Option<DateTime<Utc>>;

    fn end(&self) -> Option<DateTime<Utc>>;

    /// Both bounds, when present.
    fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.beginning()?, self.end()?))
    }

    // ── information ───────────────────────────────────────────────────

    /// Closed and zero-length.
    fn is_moment(&self) -> bool {
        matches!(self.bounds(), Some((b, e)) if b == e)
    }

    /// Absolute elapsed time between the bounds; [`TimeDelta::MAX`] when open.
    fn duration(&self) -> TimeDelta {
        match self.bounds() {
            Some((b, e)) => (e - b).abs(),
            None => TimeDelta::MAX,
        }
    }

    /// Whole `unit`s from beginning to end; `i64::MAX` when open.
    ///
    /// Years through days are counted on `calendar`; hours and below are
    /// elapsed time. A period that ends before it begins has length zero.
    fn length_in(&self, unit: CalendarUnit, calendar: &Calendar) -> i64 {
        match self.bounds() {
            Some((b, e)) => calendar.earlier_by(b, e, unit),
            None => i64::MAX,
        }
    }

    /// Calendar breakdown of the period; zero when open.
    fn chunk(&self, calendar: &Calendar) -> TimeChunk {
        match self.bounds() {
            Some((b, e)) => calendar.chunk_between(b, e),
            None => TimeChunk::ZERO,
        }
    }

    /// [`duration`](TimeSpan::duration) in days, `None` when open.
    fn length_days(&self) -> Option<Days> {
        self.bounds().map(|(b, e)| {
            let duration = (e - b).abs();
            match duration.num_nanoseconds() {
                Some(ns) => Days::new(ns as f64 / NANOS_PER_DAY),
                None => Days::new(duration.num_seconds() as f64 / SECONDS_PER_DAY),
            }
        })
    }

    /// [`duration`](TimeSpan::duration) in seconds, `None` when open.
    fn length_seconds(&self) -> Option<Seconds> {
        self.bounds().map(|(b, e)| {
            let duration = (e - b).abs();
            match duration.num_nanoseconds() {
                Some(ns) => Seconds::new(ns as f64 / 1e9),
                None => Seconds::new(duration.num_seconds() as f64),
            }
        })
    }

    // ── relationships ─────────────────────────────────────────────────

    /// Classifies `other` against this period.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tempoch_calendar::{Relation, TimePeriod, TimeSpan};
    ///
    /// let day = |d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap();
    /// let a = TimePeriod::closed(day(1), day(10));
    /// let b = TimePeriod::closed(day(5), day(15));
    /// assert_eq!(a.relation(&b), Relation::EndInside);
    /// ```
    fn relation<S: TimeSpan + ?Sized>(&self, other: &S) -> Relation {
        let ((sb, se), (pb, pe)) = match (self.bounds(), other.bounds()) {
            (Some(mine), Some(theirs)) => (mine, theirs),
            _ => return Relation::None,
        };
        if sb >= se || pb >= pe {
            return Relation::None;
        }

        if pe < sb {
            Relation::After
        } else if pe == sb {
            Relation::StartTouching
        } else if pb < sb && pe < se {
            Relation::StartInside
        } else if pb == sb && pe > se {
            Relation::InsideStartTouching
        } else if pb == sb && pe < se {
            Relation::EnclosingStartTouching
        } else if pb > sb && pe < se {
            Relation::Enclosing
        } else if pb > sb && pe == se {
            Relation::EnclosingEndTouching
        } else if pb == sb && pe == se {
            Relation::ExactMatch
        } else if pb < sb && pe > se {
            Relation::Inside
        } else if pb < sb && pe == se {
            Relation::InsideEndTouching
        } else if pb < se && pe > se {
            Relation::EndInside
        } else if pb == se && pe > se {
            Relation::EndTouching
        } else if pb > se {
            Relation::Before
        } else {
            Relation::None
        }
    }

    /// Same bounds, including both absent on the same side.
    fn same_bounds<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        self.beginning() == other.beginning() && self.end() == other.end()
    }

    /// This period lies within `other`, bounds included.
    fn is_inside<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((sb, se)), Some((pb, pe))) => pb <= sb && pe >= se,
            _ => false,
        }
    }

    /// `other` lies within this period, bounds included.
    fn contains<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((sb, se)), Some((pb, pe))) => sb <= pb && se >= pe,
            _ => false,
        }
    }

    fn contains_instant(&self, instant: DateTime<Utc>, interval: IntervalKind) -> bool {
        match (self.bounds(), interval) {
            (Some((b, e)), IntervalKind::Open) => b < instant && instant < e,
            (Some((b, e)), IntervalKind::Closed) => b <= instant && instant <= e,
            (None, _) => false,
        }
    }

    /// The periods share a stretch of time (touching alone is not enough
    /// when the other period starts after this one).
    fn overlaps<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        match (self.bounds(), other.bounds()) {
            (Some((sb, se)), Some((pb, pe))) => {
                (pb < sb && pe > sb) || (pb >= sb && pe <= se) || (pb < se && pe > se)
            }
            _ => false,
        }
    }

    /// Anything but [`Relation::Before`] or [`Relation::After`].
    ///
    /// Periods that cannot be classified count as intersecting.
    fn intersects<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        !matches!(self.relation(other), Relation::Before | Relation::After)
    }

    /// This period ends strictly before `other` begins.
    fn is_before<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        matches!((self.end(), other.beginning()), (Some(se), Some(pb)) if se < pb)
    }

    /// This period begins strictly after `other` ends.
    fn is_after<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        matches!((self.beginning(), other.end()), (Some(sb), Some(pe)) if pe < sb)
    }

    fn has_gap<S: TimeSpan + ?Sized>(&self, other: &S) -> bool {
        self.is_before(other) || self.is_after(other)
    }

    /// Elapsed time between the nearer bounds; zero when the periods touch,
    /// intersect or lack the bounds to tell.
    fn gap<S: TimeSpan + ?Sized>(&self, other: &S) -> TimeDelta {
        match (self.end(), other.beginning()) {
            (Some(se), Some(pb)) if se < pb => return pb - se,
            _ => {}
        }
        match (other.end(), self.beginning()) {
            (Some(pe), Some(sb)) if pe < sb => sb - pe,
            _ => TimeDelta::zero(),
        }
    }

    /// Calendar breakdown of [`gap`](TimeSpan::gap).
    ///
    /// `Some(TimeChunk::ZERO)` for intersecting closed periods, `None` when
    /// the bounds needed to decide are missing.
    fn gap_chunk<S: TimeSpan + ?Sized>(&self, other: &S, calendar: &Calendar) -> Option<TimeChunk> {
        match (self.end(), other.beginning()) {
            (Some(se), Some(pb)) if se < pb => return Some(calendar.chunk_between(se, pb)),
            _ => {}
        }
        match (other.end(), self.beginning()) {
            (Some(pe), Some(sb)) if pe < sb => Some(calendar.chunk_between(pe, sb)),
            _ => match (self.bounds(), other.bounds()) {
                (Some(_), Some(_)) => Some(TimeChunk::ZERO),
                _ => None,
            },
        }
    }
}

impl<T: TimeSpan + ?Sized> TimeSpan for &T {
    #[inline]
    fn beginning(&self) -> Option<DateTime<Utc>> {
        (**self).beginning()
    }

    #[inline]
    fn end(&self) -> Option<DateTime<Utc>> {
        (**self).end()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimePeriod
// ═══════════════════════════════════════════════════════════════════════════

/// A stretch of time between two optional instants.
///
/// # Examples
///
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use tempoch_calendar::{Anchor, TimePeriod, TimeSpan};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let mut period = TimePeriod::starting_at(start, TimeDelta::hours(2));
/// period.lengthen(TimeDelta::hours(2), Anchor::Center);
///
/// assert_eq!(period.beginning, Some(start - TimeDelta::hours(1)));
/// assert_eq!(period.duration(), TimeDelta::hours(4));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimePeriod {
    pub beginning: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimePeriod {
    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(beginning: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { beginning, end }
    }

    /// A period with both bounds.
    #[inline]
    pub const fn closed(beginning: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(beginning), Some(end))
    }

    /// A period with neither bound.
    #[inline]
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn starting_at(beginning: DateTime<Utc>, length: TimeDelta) -> Self {
        Self::closed(beginning, beginning + length)
    }

    pub fn ending_at(end: DateTime<Utc>, length: TimeDelta) -> Self {
        Self::closed(end - length, end)
    }

    pub fn starting_at_chunk(beginning: DateTime<Utc>, chunk: &TimeChunk, calendar: &Calendar) -> Self {
        Self::closed(beginning, calendar.add(beginning, chunk))
    }

    pub fn ending_at_chunk(end: DateTime<Utc>, chunk: &TimeChunk, calendar: &Calendar) -> Self {
        Self::closed(calendar.subtract(end, chunk), end)
    }

    /// Begins now and lasts `chunk`.
    pub fn from_now(chunk: &TimeChunk, calendar: &Calendar) -> Self {
        Self::starting_at_chunk(Utc::now(), chunk, calendar)
    }

    /// Copies the bounds of any span.
    pub fn from_span<S: TimeSpan + ?Sized>(span: &S) -> Self {
        Self::new(span.beginning(), span.end())
    }

    // ── shifting ──────────────────────────────────────────────────────

    /// Moves both present bounds by `delta`.
    pub fn shift(&mut self, delta: TimeDelta) {
        self.beginning = self.beginning.map(|b| b + delta);
        self.end = self.end.map(|e| e + delta);
    }

    pub fn shifted(&self, delta: TimeDelta) -> Self {
        let mut copy = *self;
        copy.shift(delta);
        copy
    }

    /// Moves both present bounds by `chunk` on `calendar`.
    pub fn shift_by_chunk(&mut self, chunk: &TimeChunk, calendar: &Calendar) {
        self.beginning = self.beginning.map(|b| calendar.add(b, chunk));
        self.end = self.end.map(|e| calendar.add(e, chunk));
    }

    pub fn shifted_by_chunk(&self, chunk: &TimeChunk, calendar: &Calendar) -> Self {
        let mut copy = *self;
        copy.shift_by_chunk(chunk, calendar);
        copy
    }

    // ── resizing ──────────────────────────────────────────────────────

    /// Grows the period by `delta` around `anchor`.
    pub fn lengthen(&mut self, delta: TimeDelta, anchor: Anchor) {
        match anchor {
            Anchor::Beginning => self.end = self.end.map(|e| e + delta),
            Anchor::End => self.beginning = self.beginning.map(|b| b - delta),
            Anchor::Center => {
                let half = delta / 2;
                self.beginning = self.beginning.map(|b| b - half);
                self.end = self.end.map(|e| e + half);
            }
        }
    }

    pub fn lengthened(&self, delta: TimeDelta, anchor: Anchor) -> Self {
        let mut copy = *self;
        copy.lengthen(delta, anchor);
        copy
    }

    /// Shrinks the period by `delta` around `anchor`.
    pub fn shorten(&mut self, delta: TimeDelta, anchor: Anchor) {
        self.lengthen(-delta, anchor);
    }

    pub fn shortened(&self, delta: TimeDelta, anchor: Anchor) -> Self {
        self.lengthened(-delta, anchor)
    }

    /// Grows the period by a calendar chunk.
    ///
    /// # Errors
    ///
    /// [`CalendarError::UnsupportedMutation`] for [`Anchor::Center`]: a chunk
    /// has no half. [`CalendarError::OutOfRange`] when the moved bound leaves
    /// the representable range. The period is left untouched in both cases.
    pub fn lengthen_by_chunk(&mut self, chunk: &TimeChunk, anchor: Anchor, calendar: &Calendar) -> Result<()> {
        match anchor {
            Anchor::Beginning => {
                self.end = move_bound(self.end, chunk, |e| calendar.checked_add(e, chunk))?;
            }
            Anchor::End => {
                self.beginning = move_bound(self.beginning, chunk, |b| calendar.checked_subtract(b, chunk))?;
            }
            Anchor::Center => return Err(center_chunk_rejected(chunk)),
        }
        Ok(())
    }

    pub fn lengthened_by_chunk(&self, chunk: &TimeChunk, anchor: Anchor, calendar: &Calendar) -> Result<Self> {
        let mut copy = *self;
        copy.lengthen_by_chunk(chunk, anchor, calendar)?;
        Ok(copy)
    }

    /// Shrinks the period by a calendar chunk.
    ///
    /// # Errors
    ///
    /// Same as [`TimePeriod::lengthen_by_chunk`].
    pub fn shorten_by_chunk(&mut self, chunk: &TimeChunk, anchor: Anchor, calendar: &Calendar) -> Result<()> {
        match anchor {
            Anchor::Beginning => {
                self.end = move_bound(self.end, chunk, |e| calendar.checked_subtract(e, chunk))?;
            }
            Anchor::End => {
                self.beginning = move_bound(self.beginning, chunk, |b| calendar.checked_add(b, chunk))?;
            }
            Anchor::Center => return Err(center_chunk_rejected(chunk)),
        }
        Ok(())
    }

    pub fn shortened_by_chunk(&self, chunk: &TimeChunk, anchor: Anchor, calendar: &Calendar) -> Result<Self> {
        let mut copy = *self;
        copy.shorten_by_chunk(chunk, anchor, calendar)?;
        Ok(copy)
    }

    // ── set operations ────────────────────────────────────────────────

    /// The overlapping sub-period of two closed periods.
    ///
    /// Periods are treated as half-open ranges `[beginning, end)`: periods
    /// that only touch have no intersection.
    pub fn intersection<S: TimeSpan + ?Sized>(&self, other: &S) -> Option<Self> {
        let ((sb, se), (pb, pe)) = (self.bounds()?, other.bounds()?);
        let beginning = sb.max(pb);
        let end = se.min(pe);
        (beginning < end).then(|| Self::closed(beginning, end))
    }
}

/// Applies `step` to a present bound; open bounds stay open.
fn move_bound(
    bound: Option<DateTime<Utc>>,
    chunk: &TimeChunk,
    step: impl FnOnce(DateTime<Utc>) -> Option<DateTime<Utc>>,
) -> Result<Option<DateTime<Utc>>> {
    bound
        .map(|instant| {
            step(instant).ok_or_else(|| CalendarError::OutOfRange(format!("{instant} moved by {chunk}")))
        })
        .transpose()
}

fn center_chunk_rejected(chunk: &TimeChunk) -> CalendarError {
    tracing::warn!(%chunk, "cannot resize a period around its center by a calendar chunk");
    CalendarError::UnsupportedMutation("calendar chunks cannot be split around the center of a period")
}

impl TimeSpan for TimePeriod {
    #[inline]
    fn beginning(&self) -> Option<DateTime<Utc>> {
        self.beginning
    }

    #[inline]
    fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

// Display implementation
impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn bound(f: &mut fmt::Formatter<'_>, value: Option<DateTime<Utc>>) -> fmt::Result {
            match value {
                Some(instant) => write!(f, "{instant}"),
                None => f.write_str(".."),
            }
        }
        bound(f, self.beginning)?;
        f.write_str(" to ")?;
        bound(f, self.end)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<TimeDelta> for TimePeriod {
    type Output = TimePeriod;
    #[inline]
    fn add(self, rhs: TimeDelta) -> Self::Output {
        self.lengthened(rhs, Anchor::Beginning)
    }
}

impl AddAssign<TimeDelta> for TimePeriod {
    #[inline]
    fn add_assign(&mut self, rhs: TimeDelta) {
        self.lengthen(rhs, Anchor::Beginning);
    }
}

impl Sub<TimeDelta> for TimePeriod {
    type Output = TimePeriod;
    #[inline]
    fn sub(self, rhs: TimeDelta) -> Self::Output {
        self.shortened(rhs, Anchor::Beginning)
    }
}

impl SubAssign<TimeDelta> for TimePeriod {
    #[inline]
    fn sub_assign(&mut self, rhs: TimeDelta) {
        self.shorten(rhs, Anchor::Beginning);
    }
}

/// [`TimePeriod::lengthened_by_chunk`] at the beginning anchor on the
/// ambient calendar.
///
/// # Panics
///
/// If the new end is outside chrono's representable range.
impl Add<TimeChunk> for TimePeriod {
    type Output = TimePeriod;
    fn add(self, rhs: TimeChunk) -> Self::Output {
        self.lengthened_by_chunk(&rhs, Anchor::Beginning, &Calendar::current())
            .expect(OUT_OF_RANGE)
    }
}

/// [`TimePeriod::shortened_by_chunk`] at the beginning anchor on the
/// ambient calendar.
///
/// # Panics
///
/// If the new end is outside chrono's representable range.
impl Sub<TimeChunk> for TimePeriod {
    type Output = TimePeriod;
    fn sub(self, rhs: TimeChunk) -> Self::Output {
        self.shortened_by_chunk(&rhs, Anchor::Beginning, &Calendar::current())
            .expect(OUT_OF_RANGE)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkUnits;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Closed period between two hour offsets from `t0`.
    fn hours(from: i64, to: i64) -> TimePeriod {
        TimePeriod::closed(t0() + TimeDelta::hours(from), t0() + TimeDelta::hours(to))
    }

    #[test]
    fn test_relation_table() {
        let base = hours(10, 20);
        let cases = [
            (hours(0, 5), Relation::After),
            (hours(0, 10), Relation::StartTouching),
            (hours(5, 15), Relation::StartInside),
            (hours(10, 25), Relation::InsideStartTouching),
            (hours(10, 15), Relation::EnclosingStartTouching),
            (hours(12, 18), Relation::Enclosing),
            (hours(12, 20), Relation::EnclosingEndTouching),
            (hours(10, 20), Relation::ExactMatch),
            (hours(5, 25), Relation::Inside),
            (hours(5, 20), Relation::InsideEndTouching),
            (hours(15, 25), Relation::EndInside),
            (hours(20, 25), Relation::EndTouching),
            (hours(25, 30), Relation::Before),
        ];
        for (other, expected) in cases {
            assert_eq!(base.relation(&other), expected, "other = {other}");
        }
    }

    #[test]
    fn test_relation_none_for_ill_formed_periods() {
        let base = hours(10, 20);
        assert_eq!(base.relation(&hours(15, 15)), Relation::None);
        assert_eq!(base.relation(&hours(18, 12)), Relation::None);
        assert_eq!(hours(20, 10).relation(&base), Relation::None);
        let open = TimePeriod::new(Some(t0()), None);
        assert_eq!(base.relation(&open), Relation::None);
        assert_eq!(open.relation(&base), Relation::None);
        // Unclassifiable pairs still count as intersecting.
        assert!(base.intersects(&open));
    }

    #[test]
    fn test_overlaps_and_intersects() {
        let base = hours(10, 20);
        assert!(base.overlaps(&hours(5, 15)));
        assert!(base.overlaps(&hours(12, 18)));
        assert!(base.overlaps(&hours(5, 25)));
        assert!(base.overlaps(&hours(15, 25)));
        assert!(!base.overlaps(&hours(20, 25)));
        assert!(!base.overlaps(&hours(25, 30)));

        assert!(base.intersects(&hours(20, 25)));
        assert!(base.intersects(&hours(0, 10)));
        assert!(!base.intersects(&hours(21, 25)));
        assert!(!base.intersects(&hours(0, 9)));
        assert!(!base.overlaps(&TimePeriod::unbounded()));
    }

    #[test]
    fn test_containment() {
        let base = hours(10, 20);
        assert!(hours(12, 18).is_inside(&base));
        assert!(base.is_inside(&base));
        assert!(!hours(5, 18).is_inside(&base));
        assert!(base.contains(&hours(10, 20)));
        assert!(!base.contains(&hours(10, 21)));

        let edge = t0() + TimeDelta::hours(10);
        assert!(base.contains_instant(edge, IntervalKind::Closed));
        assert!(!base.contains_instant(edge, IntervalKind::Open));
        assert!(base.contains_instant(edge + TimeDelta::seconds(1), IntervalKind::Open));
        assert!(!TimePeriod::unbounded().contains_instant(edge, IntervalKind::Closed));
    }

    #[test]
    fn test_gap() {
        let a = hours(0, 10);
        let b = hours(15, 20);
        assert_eq!(a.gap(&b), TimeDelta::hours(5));
        assert_eq!(b.gap(&a), TimeDelta::hours(5));
        assert_eq!(a.gap(&hours(5, 12)), TimeDelta::zero());
        assert_eq!(a.gap(&hours(10, 12)), TimeDelta::zero());

        assert!(a.has_gap(&b));
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(!a.has_gap(&hours(10, 12)));

        let cal = Calendar::UTC;
        assert_eq!(a.gap_chunk(&b, &cal), Some(5.hours()));
        assert_eq!(b.gap_chunk(&a, &cal), Some(5.hours()));
        assert_eq!(a.gap_chunk(&hours(5, 12), &cal), Some(TimeChunk::ZERO));
        let open = TimePeriod::new(Some(t0()), None);
        assert_eq!(open.gap_chunk(&hours(5, 12), &cal), None);
    }

    #[test]
    fn test_information_accessors() {
        let cal = Calendar::UTC;
        let begin = t0();
        let end = Utc.with_ymd_and_hms(2025, 3, 15, 6, 0, 0).unwrap();
        let period = TimePeriod::closed(begin, end);

        assert_eq!(period.length_in(CalendarUnit::Year, &cal), 1);
        assert_eq!(period.length_in(CalendarUnit::Month, &cal), 14);
        assert_eq!(period.length_in(CalendarUnit::Day, &cal), 439);
        assert_eq!(period.length_in(CalendarUnit::Week, &cal), 62);
        assert_eq!(period.length_in(CalendarUnit::Hour, &cal), 439 * 24 + 6);
        assert_eq!(period.chunk(&cal), TimeChunk::new(0, 0, 6, 14, 0, 2, 1));
        assert!(!period.is_moment());
        assert!(TimePeriod::closed(begin, begin).is_moment());
    }

    #[test]
    fn test_open_periods_use_sentinels() {
        let cal = Calendar::UTC;
        let open = TimePeriod::new(None, Some(t0()));
        assert_eq!(open.duration(), TimeDelta::MAX);
        assert_eq!(open.length_in(CalendarUnit::Second, &cal), i64::MAX);
        assert_eq!(open.chunk(&cal), TimeChunk::ZERO);
        assert_eq!(open.length_days(), None);
        assert!(!open.is_moment());
    }

    #[test]
    fn test_length_quantities() {
        let period = hours(0, 36);
        let days = period.length_days().unwrap();
        let seconds = period.length_seconds().unwrap();
        assert!((days - Days::new(1.5)).abs() < Days::new(1e-12));
        assert!((seconds - Seconds::new(129_600.0)).abs() < Seconds::new(1e-6));
        // Reversed bounds report the absolute length.
        assert_eq!(hours(36, 0).duration(), TimeDelta::hours(36));
    }

    #[test]
    fn test_shift() {
        let mut period = hours(0, 2);
        period.shift(TimeDelta::hours(3));
        assert_eq!(period, hours(3, 5));
        assert_eq!(period.shifted(-TimeDelta::hours(3)), hours(0, 2));

        let cal = Calendar::UTC;
        let moved = hours(0, 2).shifted_by_chunk(&1.months(), &cal);
        assert_eq!(
            moved.beginning,
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
        );

        let mut half_open = TimePeriod::new(Some(t0()), None);
        half_open.shift(TimeDelta::hours(1));
        assert_eq!(half_open.end, None);
    }

    #[test]
    fn test_lengthen_and_shorten_by_span() {
        let base = hours(10, 20);
        assert_eq!(base.lengthened(TimeDelta::hours(4), Anchor::Beginning), hours(10, 24));
        assert_eq!(base.lengthened(TimeDelta::hours(4), Anchor::End), hours(6, 20));
        assert_eq!(base.lengthened(TimeDelta::hours(4), Anchor::Center), hours(8, 22));
        assert_eq!(base.shortened(TimeDelta::hours(4), Anchor::Beginning), hours(10, 16));
        assert_eq!(base.shortened(TimeDelta::hours(4), Anchor::End), hours(14, 20));
        assert_eq!(base.shortened(TimeDelta::hours(4), Anchor::Center), hours(12, 18));

        let mut in_place = base;
        in_place.lengthen(TimeDelta::hours(4), Anchor::Center);
        assert_eq!(in_place, base.lengthened(TimeDelta::hours(4), Anchor::Center));
    }

    #[test]
    fn test_resize_by_chunk() {
        let cal = Calendar::UTC;
        let base = hours(10, 20);
        assert_eq!(
            base.lengthened_by_chunk(&4.hours(), Anchor::Beginning, &cal),
            Ok(hours(10, 24))
        );
        assert_eq!(
            base.shortened_by_chunk(&4.hours(), Anchor::End, &cal),
            Ok(hours(14, 20))
        );

        let mut untouched = base;
        let err = untouched
            .lengthen_by_chunk(&1.days(), Anchor::Center, &cal)
            .unwrap_err();
        assert!(matches!(err, CalendarError::UnsupportedMutation(_)));
        assert_eq!(untouched, base);
        assert!(base.shortened_by_chunk(&1.days(), Anchor::Center, &cal).is_err());
    }

    #[test]
    fn test_resize_by_chunk_past_representable_range() {
        let cal = Calendar::UTC;
        let mut base = hours(10, 20);
        let err = base
            .lengthen_by_chunk(&300_000.years(), Anchor::Beginning, &cal)
            .unwrap_err();
        assert!(matches!(err, CalendarError::OutOfRange(_)));
        assert!(base.shorten_by_chunk(&300_000.years(), Anchor::End, &cal).is_err());
        assert_eq!(base, hours(10, 20));

        // Open bounds have nothing to move.
        let open = TimePeriod::new(None, None);
        assert_eq!(
            open.lengthened_by_chunk(&300_000.years(), Anchor::Beginning, &cal),
            Ok(open)
        );
    }

    #[test]
    fn test_operators() {
        let base = hours(10, 20);
        assert_eq!(base + TimeDelta::hours(1), hours(10, 21));
        assert_eq!(base - TimeDelta::hours(1), hours(10, 19));

        let mut assigned = base;
        assigned += TimeDelta::hours(2);
        assigned -= TimeDelta::hours(1);
        assert_eq!(assigned, hours(10, 21));

        // Hour chunks are elapsed time on every calendar.
        assert_eq!(base + 1.hours(), hours(10, 21));
        assert_eq!(base - 1.hours(), hours(10, 19));
    }

    #[test]
    fn test_equality_and_same_bounds() {
        assert_eq!(TimePeriod::unbounded(), TimePeriod::default());
        assert_ne!(TimePeriod::new(Some(t0()), None), TimePeriod::new(None, Some(t0())));
        assert!(hours(1, 2).same_bounds(&&hours(1, 2)));
    }

    #[test]
    fn test_constructors() {
        let cal = Calendar::UTC;
        assert_eq!(TimePeriod::starting_at(t0(), TimeDelta::hours(3)), hours(0, 3));
        assert_eq!(
            TimePeriod::ending_at(t0() + TimeDelta::hours(3), TimeDelta::hours(3)),
            hours(0, 3)
        );
        assert_eq!(TimePeriod::starting_at_chunk(t0(), &3.hours(), &cal), hours(0, 3));
        assert_eq!(
            TimePeriod::ending_at_chunk(t0() + TimeDelta::hours(3), &3.hours(), &cal),
            hours(0, 3)
        );
        let from_now = TimePeriod::from_now(&1.days(), &cal);
        assert_eq!(from_now.duration(), TimeDelta::days(1));
        assert_eq!(TimePeriod::from_span(&hours(1, 2)), hours(1, 2));
    }

    #[test]
    fn test_intersection() {
        assert_eq!(hours(0, 10).intersection(&hours(5, 15)), Some(hours(5, 10)));
        assert_eq!(hours(0, 10).intersection(&hours(10, 15)), None);
        assert_eq!(hours(0, 10).intersection(&hours(12, 15)), None);
        assert_eq!(hours(0, 10).intersection(&TimePeriod::unbounded()), None);
    }

    #[test]
    fn test_display() {
        let period = hours(0, 1);
        assert_eq!(
            period.to_string(),
            "2024-01-01 00:00:00 UTC to 2024-01-01 01:00:00 UTC"
        );
        assert_eq!(
            TimePeriod::new(Some(t0()), None).to_string(),
            "2024-01-01 00:00:00 UTC to .."
        );
    }
}
