// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tempoch_calendar::{
    Anchor, Calendar, CalendarError, CalendarUnit, ChunkUnits, IntervalKind, Relation, TimeChunk,
    TimePeriod, TimePeriodChain, TimePeriodCollection, TimePeriodGroup, TimeSpan, TimeUnit,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

#[test]
fn overlapping_periods_classify_as_end_inside() {
    let a = TimePeriod::closed(utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 10, 0, 0, 0));
    let b = TimePeriod::closed(utc(2024, 1, 5, 0, 0, 0), utc(2024, 1, 15, 0, 0, 0));

    assert_eq!(a.relation(&b), Relation::EndInside);
    assert_eq!(b.relation(&a), Relation::StartInside);
    assert!(a.overlaps(&b));
    assert!(a.intersects(&b));
    assert_eq!(a.gap(&b), TimeDelta::zero());
    assert_eq!(a.gap_chunk(&b, &Calendar::UTC), Some(TimeChunk::ZERO));
}

#[test]
fn chain_places_appended_periods_after_the_tail() {
    let t0 = utc(2024, 6, 3, 8, 0, 0);
    let mut chain = TimePeriodChain::new();
    chain.append(TimePeriod::closed(t0, t0 + TimeDelta::hours(1))).unwrap();
    chain
        .append(TimePeriod::starting_at(utc(1999, 1, 1, 0, 0, 0), TimeDelta::minutes(30)))
        .unwrap();

    assert_eq!(
        chain[1],
        TimePeriod::closed(t0 + TimeDelta::hours(1), t0 + TimeDelta::minutes(90))
    );
    assert_eq!(chain.end(), Some(t0 + TimeDelta::minutes(90)));
    assert_eq!(chain.duration(), Some(TimeDelta::minutes(90)));
}

#[test]
fn chain_rejects_open_periods_without_changes() {
    let t0 = utc(2024, 6, 3, 8, 0, 0);
    let mut chain = TimePeriodChain::new();
    chain.append(TimePeriod::starting_at(t0, TimeDelta::hours(1))).unwrap();

    let err = chain.append(TimePeriod::new(Some(t0), None)).unwrap_err();
    assert!(matches!(err, CalendarError::InvalidChainInsert(_)));
    let err = chain.insert(0, TimePeriod::unbounded()).unwrap_err();
    assert!(matches!(err, CalendarError::InvalidChainInsert(_)));
    assert_eq!(chain.len(), 1);
    assert_eq!(chain.bounding_period(), TimePeriod::starting_at(t0, TimeDelta::hours(1)));
}

#[test]
fn chunk_conversion_uses_fixed_lengths_without_months() {
    assert_eq!(400.days().to(TimeUnit::Years), Ok(1));
    assert_eq!(
        1.months().to(TimeUnit::Years),
        Err(CalendarError::UnsupportedConversion {
            months: 1,
            unit: TimeUnit::Years
        })
    );
    assert_eq!((1.years() + 2.weeks()).to(TimeUnit::Days), Ok(379));
}

#[test]
fn month_boundaries() {
    let instant = utc(2024, 3, 17, 13, 45, 30);
    let cal = Calendar::UTC;

    assert_eq!(cal.start_of(instant, CalendarUnit::Month), utc(2024, 3, 1, 0, 0, 0));
    assert_eq!(
        cal.end_of(instant, CalendarUnit::Month),
        utc(2024, 3, 31, 23, 59, 59) + TimeDelta::milliseconds(999)
    );
}

#[test]
fn calendar_arithmetic_follows_local_time() {
    let madrid = Calendar::new(chrono_tz::Europe::Madrid);
    // 2024-03-31 is the spring-forward day in Madrid.
    let before = madrid.date_time(2024, 3, 30, 12, 0, 0).unwrap();
    let after = madrid.add(before, &1.days());

    assert_eq!(after - before, TimeDelta::hours(23));
    assert_eq!(madrid.difference(after, before, CalendarUnit::Day), 1);
    assert_eq!(madrid.difference(after, before, CalendarUnit::Hour), 23);

    let end_of_january = madrid.date(2024, 1, 31).unwrap();
    assert_eq!(madrid.add(end_of_january, &1.months()), madrid.date(2024, 2, 29).unwrap());
}

#[test]
fn chunk_between_reads_like_speech() {
    let cal = Calendar::UTC;
    let from = utc(2023, 1, 15, 10, 0, 0);
    let to = utc(2024, 3, 18, 12, 30, 5);

    let chunk = cal.chunk_between(from, to);
    assert_eq!(chunk, TimeChunk::new(5, 30, 2, 3, 0, 2, 1));
    assert_eq!(cal.add(from, &chunk), to);
    assert_eq!(cal.chunk_between(to, from), -chunk);
}

#[test]
fn period_resizing_and_containment() {
    let t0 = utc(2024, 1, 1, 0, 0, 0);
    let mut period = TimePeriod::starting_at(t0, TimeDelta::hours(4));

    period.lengthen(TimeDelta::hours(2), Anchor::Center);
    assert_eq!(period, TimePeriod::closed(t0 - TimeDelta::hours(1), t0 + TimeDelta::hours(5)));
    assert!(period.contains_instant(t0, IntervalKind::Open));
    assert!(!period.contains_instant(t0 + TimeDelta::hours(5), IntervalKind::Open));
    assert!(period.contains_instant(t0 + TimeDelta::hours(5), IntervalKind::Closed));

    let err = period
        .lengthen_by_chunk(&1.months(), Anchor::Center, &Calendar::UTC)
        .unwrap_err();
    assert!(matches!(err, CalendarError::UnsupportedMutation(_)));

    period
        .lengthen_by_chunk(&1.months(), Anchor::End, &Calendar::UTC)
        .unwrap();
    assert_eq!(period.beginning, Some(utc(2023, 11, 30, 23, 0, 0)));
}

#[test]
fn collection_queries() {
    let day = |d| utc(2024, 1, d, 0, 0, 0);
    let mut collection: TimePeriodCollection = [
        TimePeriod::closed(day(10), day(12)),
        TimePeriod::closed(day(2), day(4)),
        TimePeriod::closed(day(3), day(20)),
    ]
    .into_iter()
    .collect();

    assert_eq!(collection.bounding_period(), TimePeriod::closed(day(2), day(20)));
    assert_eq!(collection.periods_intersected_by(day(11)).len(), 2);
    assert_eq!(
        collection.all_inside(&TimePeriod::closed(day(1), day(13))).len(),
        2
    );

    collection.sort_by_beginning();
    assert_eq!(collection[0], TimePeriod::closed(day(2), day(4)));

    collection.append(TimePeriod::new(None, Some(day(5))));
    assert_eq!(collection.beginning(), None);
    assert_eq!(collection.end(), Some(day(20)));
    assert_eq!(collection.remove(3), Some(TimePeriod::new(None, Some(day(5)))));
    assert_eq!(collection.beginning(), Some(day(2)));
}

#[test]
fn invalid_construction_is_an_error() {
    let cal = Calendar::UTC;
    assert!(matches!(cal.date(2023, 2, 29), Err(CalendarError::InvalidCalendarDate(_))));
    assert!(matches!(
        cal.parse("2024-13-01", "%Y-%m-%d"),
        Err(CalendarError::InvalidCalendarDate(_))
    ));
    assert_eq!(
        cal.parse("2024-02-29 06:30:00", "%Y-%m-%d %H:%M:%S"),
        Ok(utc(2024, 2, 29, 6, 30, 0))
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_period_keeps_open_bounds() {
    let period = TimePeriod::new(Some(utc(2024, 1, 1, 0, 0, 0)), None);
    let json = serde_json::to_string(&period).unwrap();
    assert!(json.contains("\"beginning\""));
    assert!(json.contains("\"end\":null"));
    let back: TimePeriod = serde_json::from_str(&json).unwrap();
    assert_eq!(back, period);

    let relation = serde_json::to_string(&Relation::EndInside).unwrap();
    assert_eq!(relation, "\"endInside\"");
}
