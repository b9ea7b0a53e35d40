//! Order eligibility policy
//!
//! Decides whether an order for a shift on a given service date is accepted
//! at a given instant, and reports the cutoff instant that applies.
//!
//! Everything here is a pure function of its inputs. The local calendar is
//! the time zone carried by `now`: "today" is `now`'s local date and a
//! service date's `HH:MM` is resolved in that zone.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use shared::eligibility::evaluate;
//! use shared::models::{Settings, Shift, ShiftId};
//!
//! let shift = Shift {
//!     id: ShiftId::new("1"),
//!     name: "Breakfast".into(),
//!     start_time: "08:00".into(),
//!     end_time: "10:00".into(),
//!     meal_price: 25000,
//!     is_active: true,
//! };
//! let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let now = Utc.with_ymd_and_hms(2026, 10, 16, 1, 0, 0).unwrap();
//!
//! // default settings: per-shift, 6 hours before start
//! let result = evaluate(&now, &shift, date, &Settings::default()).unwrap();
//! assert!(result.allowed);
//! assert_eq!(result.cutoff, Utc.with_ymd_and_hms(2026, 10, 16, 2, 0, 0).unwrap());
//! ```

mod clock;
mod error;
mod per_shift;
mod weekly;

pub use clock::BusinessClock;
pub use error::{PolicyError, PolicyResult};
pub use weekly::order_window;

use std::fmt;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::models::{CutoffRule, OrderingPolicy, Settings, Shift};

/// Why an order was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// Shift is deactivated
    ShiftInactive,
    /// Service date is before today
    DateInPast,
    /// Service date is further ahead than `maxOrderDaysAhead`
    BeyondHorizon,
    /// The cutoff instant has passed
    CutoffPassed,
    /// Weekday is not in `orderableDays`
    DayNotOrderable,
    /// The weekly window for this date has not opened yet
    WindowNotOpen,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ShiftInactive => "shift is not active",
            Self::DateInPast => "service date is in the past",
            Self::BeyondHorizon => "service date is too far ahead",
            Self::CutoffPassed => "ordering cutoff has passed",
            Self::DayNotOrderable => "weekday is not orderable",
            Self::WindowNotOpen => "ordering has not opened yet",
        })
    }
}

/// Outcome of an eligibility check
#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility<Tz: TimeZone> {
    pub allowed: bool,
    /// Instant after which the order is no longer accepted
    pub cutoff: DateTime<Tz>,
    /// Instant the order window opens (weekly mode only)
    pub opens_at: Option<DateTime<Tz>>,
    /// First failing condition, `None` when allowed
    pub denial: Option<Denial>,
}

impl<Tz: TimeZone> Eligibility<Tz> {
    fn decide(cutoff: DateTime<Tz>, opens_at: Option<DateTime<Tz>>, denial: Option<Denial>) -> Self {
        Self {
            allowed: denial.is_none(),
            cutoff,
            opens_at,
            denial,
        }
    }
}

/// Check a shift/date against raw settings.
///
/// Fails with [`PolicyError::Configuration`] for an unknown cutoff mode or a
/// missing field of the active mode, and with [`PolicyError::Validation`]
/// for malformed shift times or out-of-range settings.
pub fn evaluate<Tz: TimeZone>(
    now: &DateTime<Tz>,
    shift: &Shift,
    date: NaiveDate,
    settings: &Settings,
) -> PolicyResult<Eligibility<Tz>> {
    let policy = settings.policy()?;
    evaluate_policy(now, shift, date, &policy)
}

/// Same as [`evaluate`] with a typed policy.
///
/// A hand-built policy is range-checked like one read from settings.
pub fn evaluate_policy<Tz: TimeZone>(
    now: &DateTime<Tz>,
    shift: &Shift,
    date: NaiveDate,
    policy: &OrderingPolicy,
) -> PolicyResult<Eligibility<Tz>> {
    policy.validate()?;
    let start = shift.start()?;
    shift.end()?;

    let result = match &policy.cutoff {
        CutoffRule::PerShift(rule) => per_shift::evaluate(now, start, date, rule, shift.is_active)?,
        CutoffRule::Weekly(rule) => weekly::evaluate(now, date, rule, shift.is_active)?,
    };

    tracing::debug!(
        shift = %shift.id,
        %date,
        mode = %policy.cutoff.mode(),
        allowed = result.allowed,
        denial = ?result.denial,
        "Evaluated order eligibility"
    );
    Ok(result)
}

/// Dates in `[from, from + days)` that can currently be ordered for `shift`.
pub fn orderable_dates<Tz: TimeZone>(
    now: &DateTime<Tz>,
    shift: &Shift,
    policy: &OrderingPolicy,
    from: NaiveDate,
    days: u32,
) -> PolicyResult<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    for date in from.iter_days().take(days as usize) {
        if evaluate_policy(now, shift, date, policy)?.allowed {
            dates.push(date);
        }
    }
    Ok(dates)
}

/// Resolve a local wall-clock time in `tz`.
///
/// DST overlap resolves to the later instant; a DST gap falls back to
/// reading the wall-clock as UTC.
pub(crate) fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .latest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

pub(crate) fn add_days(date: NaiveDate, days: u64) -> PolicyResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| PolicyError::Validation(format!("{date} + {days} days is out of range")))
}

pub(crate) fn sub_days(date: NaiveDate, days: u64) -> PolicyResult<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| PolicyError::Validation(format!("{date} - {days} days is out of range")))
}
