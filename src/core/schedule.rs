//! Wall-clock arithmetic for the daily refresh

use chrono::{DateTime, Days, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::time::Duration;

/// Next instant strictly after `now` whose local time is `hour`:00:00
///
/// `hour` is taken modulo 24. At the boundary instant itself the refresh
/// rolls to the next day. When the hour falls into a DST gap the first
/// valid instant after it is used; an ambiguous hour resolves to its
/// earlier occurrence.
pub fn next_daily_refresh<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> DateTime<Tz> {
    let time = NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN);
    let tz = now.timezone();
    let today = now.date_naive();

    for offset in 0..3 {
        let Some(date) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        if let Some(candidate) = resolve_local(&tz, date, time) {
            if candidate > *now {
                return candidate;
            }
        }
    }

    log::warn!("Could not resolve refresh hour {}, retrying in a day", hour);
    now.clone() + chrono::Duration::days(1)
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
    let naive = NaiveDateTime::new(date, time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        // Skipped by a DST jump: take the same wall time one hour later
        LocalResult::None => tz
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .earliest(),
    }
}

/// Time left from `now` until `target`, zero when it has passed
pub fn duration_until<Tz: TimeZone>(now: &DateTime<Tz>, target: &DateTime<Tz>) -> Duration {
    target
        .clone()
        .signed_duration_since(now.clone())
        .to_std()
        .unwrap_or(Duration::ZERO)
}
