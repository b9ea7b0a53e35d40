//! Per-shift cutoff: orders close a fixed lead time before the shift starts.

use chrono::{DateTime, NaiveDate, TimeZone};

use super::{Denial, Eligibility, PolicyError, PolicyResult, add_days, local_instant};
use crate::models::{ClockTime, PerShiftCutoff};

pub(super) fn evaluate<Tz: TimeZone>(
    now: &DateTime<Tz>,
    start: ClockTime,
    date: NaiveDate,
    rule: &PerShiftCutoff,
    active: bool,
) -> PolicyResult<Eligibility<Tz>> {
    let shift_start = local_instant(&now.timezone(), date.and_time(start.as_naive()));
    let cutoff = shift_start
        .checked_sub_signed(rule.lead_time())
        .ok_or_else(|| PolicyError::Validation(format!("cutoff for {date} is out of range")))?;

    let today = now.date_naive();
    let horizon = add_days(today, u64::from(rule.max_days_ahead))?;

    let denial = if !active {
        Some(Denial::ShiftInactive)
    } else if date < today {
        Some(Denial::DateInPast)
    } else if date > horizon {
        Some(Denial::BeyondHorizon)
    } else if *now >= cutoff {
        Some(Denial::CutoffPassed)
    } else {
        None
    };

    Ok(Eligibility::decide(cutoff, None, denial))
}
