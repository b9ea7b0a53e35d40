//! Weekly cutoff
//!
//! Weeks run Monday to Sunday. Ordering for a week opens at the last weekly
//! cutoff at or before that week's Monday 00:00 (moved earlier by one week
//! per extra week of `maxWeeksAhead`) and closes at the following cutoff.
//! The window is half-open: `[open, close)`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone};

use super::{Denial, Eligibility, PolicyResult, add_days, local_instant, sub_days};
use crate::models::{WeeklyCutoff, weekday_number};

/// The `[open, close)` ordering window for `date` in `tz`.
pub fn order_window<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    rule: &WeeklyCutoff,
) -> PolicyResult<(DateTime<Tz>, DateTime<Tz>)> {
    let time = rule.time()?;
    let week_start = sub_days(date, u64::from(date.weekday().num_days_from_monday()))?;

    let back = (weekday_number(week_start.weekday()) + 7 - weekday_number(rule.day)) % 7;
    let mut base = sub_days(week_start, u64::from(back))?.and_time(time);
    if base > week_start.and_time(NaiveTime::MIN) {
        // cutoff falls later on the Monday itself
        base = sub_days(base.date(), 7)?.and_time(time);
    }

    let extra_weeks = u64::from(rule.max_weeks_ahead.saturating_sub(1)) * 7;
    let open = sub_days(base.date(), extra_weeks)?.and_time(time);
    let close = add_days(base.date(), 7)?.and_time(time);

    Ok((local_instant(tz, open), local_instant(tz, close)))
}

pub(super) fn evaluate<Tz: TimeZone>(
    now: &DateTime<Tz>,
    date: NaiveDate,
    rule: &WeeklyCutoff,
    active: bool,
) -> PolicyResult<Eligibility<Tz>> {
    if !rule.orderable_days.contains(date.weekday()) {
        // refused even where no window can be computed
        let (cutoff, opens_at) = match order_window(&now.timezone(), date, rule) {
            Ok((open, close)) => (close, Some(open)),
            Err(_) => (now.clone(), None),
        };
        return Ok(Eligibility::decide(cutoff, opens_at, Some(Denial::DayNotOrderable)));
    }

    let (open, close) = order_window(&now.timezone(), date, rule)?;
    let denial = if !active {
        Some(Denial::ShiftInactive)
    } else if date < now.date_naive() {
        Some(Denial::DateInPast)
    } else if *now < open {
        Some(Denial::WindowNotOpen)
    } else if *now >= close {
        Some(Denial::CutoffPassed)
    } else {
        None
    };

    Ok(Eligibility::decide(close, Some(open), denial))
}
