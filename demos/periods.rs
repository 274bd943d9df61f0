use chrono::{TimeDelta, Utc};
use tempoch_calendar::{
    Calendar, CalendarUnit, ChunkUnits, English, InstantExt, TimeAgoOptions, TimePeriod,
    TimePeriodChain, TimePeriodGroup, TimeSpan,
};

fn main() {
    let calendar = Calendar::current();
    let now = Utc::now();

    let month = TimePeriod::closed(
        calendar.start_of(now, CalendarUnit::Month),
        calendar.end_of(now, CalendarUnit::Month),
    );
    let next_week = TimePeriod::from_now(&1.weeks(), &calendar);

    println!("timezone: {}", calendar.timezone());
    println!("this month: {month}");
    println!("next week: {next_week}");
    println!("relation: {:?}", next_week.relation(&month));

    let mut agenda = TimePeriodChain::new();
    for minutes in [45, 15, 90] {
        if let Err(err) = agenda.append(TimePeriod::starting_at(now, TimeDelta::minutes(minutes))) {
            eprintln!("skipped: {err}");
        }
    }
    println!("agenda ends: {:?}", agenda.end());

    let launch = now - 3.days() - 2.hours();
    println!("launch: {}", launch.time_ago_since_now(TimeAgoOptions::default()));
    println!("short: {}", calendar.short_time_ago(launch, now, &English));
}
