//! Ordering settings
//!
//! [`Settings`] is the flat record exchanged with `/api/settings`. It holds
//! both cutoff sub-configurations; `cutoffMode` picks the one that counts.
//! [`OrderingPolicy`] is the validated, typed view the eligibility policy
//! works on.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use super::{WeekdaySet, weekday_from_number, weekday_number};
use crate::eligibility::{PolicyError, PolicyResult};

/// Which cutoff sub-configuration is authoritative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CutoffMode {
    /// Fixed lead time before each shift's start
    PerShift,
    /// One cutoff instant per week
    Weekly,
}

impl CutoffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerShift => "per-shift",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for CutoffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CutoffMode {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-shift" => Ok(Self::PerShift),
            "weekly" => Ok(Self::Weekly),
            other => Err(PolicyError::Configuration(format!(
                "unrecognized cutoff mode '{other}'"
            ))),
        }
    }
}

/// Settings record as stored by the backend (`GET/PUT /api/settings`)
///
/// Every numeric field is optional on the wire: the inactive cutoff
/// sub-configuration may be absent, and a missing field of the active one
/// is reported as a configuration error instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub cutoff_mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist_strikes: Option<i64>,
    /// Blacklist duration in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_order_days_ahead: Option<i64>,

    // per-shift
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_hours: Option<i64>,

    // weekly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_cutoff_day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_cutoff_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_cutoff_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orderable_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_weeks_ahead: Option<i64>,
}

impl Default for Settings {
    /// Per-shift mode, 6 hours lead time, a week of advance ordering; the
    /// weekly sub-configuration is pre-filled with Friday 17:00, Mon-Fri.
    fn default() -> Self {
        Self {
            cutoff_mode: CutoffMode::PerShift.as_str().to_string(),
            blacklist_strikes: Some(3),
            blacklist_duration: Some(7),
            max_order_days_ahead: Some(7),
            cutoff_days: Some(0),
            cutoff_hours: Some(6),
            weekly_cutoff_day: Some(5),
            weekly_cutoff_hour: Some(17),
            weekly_cutoff_minute: Some(0),
            orderable_days: Some("1,2,3,4,5".to_string()),
            max_weeks_ahead: Some(1),
        }
    }
}

impl Settings {
    /// Validate and convert into the typed policy
    pub fn policy(&self) -> PolicyResult<OrderingPolicy> {
        OrderingPolicy::from_settings(self)
    }

    /// Copy of these settings with the policy's values written back.
    ///
    /// Only the active sub-configuration is overwritten; the other one keeps
    /// whatever was stored so switching modes back and forth loses nothing.
    pub fn with_policy(&self, policy: &OrderingPolicy) -> Settings {
        let mut out = self.clone();
        out.cutoff_mode = policy.cutoff.mode().as_str().to_string();
        out.blacklist_strikes = Some(policy.blacklist.strikes.into());
        out.blacklist_duration = Some(policy.blacklist.duration_days.into());
        match &policy.cutoff {
            CutoffRule::PerShift(rule) => {
                out.cutoff_days = Some(rule.days.into());
                out.cutoff_hours = Some(rule.hours.into());
                out.max_order_days_ahead = Some(rule.max_days_ahead.into());
            }
            CutoffRule::Weekly(rule) => {
                out.weekly_cutoff_day = Some(weekday_number(rule.day).into());
                out.weekly_cutoff_hour = Some(rule.hour.into());
                out.weekly_cutoff_minute = Some(rule.minute.into());
                out.orderable_days = Some(rule.orderable_days.to_string());
                out.max_weeks_ahead = Some(rule.max_weeks_ahead.into());
            }
        }
        out
    }
}

/// Blacklist threshold configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlacklistPolicy {
    /// Missed orders before a user is blacklisted
    pub strikes: u32,
    /// Blacklist length in days
    pub duration_days: u32,
}

/// Per-shift cutoff: a fixed lead time before each shift starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerShiftCutoff {
    pub days: u32,
    /// 0-23
    pub hours: u32,
    /// How many days past today may be ordered
    pub max_days_ahead: u32,
}

impl PerShiftCutoff {
    /// `days * 24 + hours`
    pub fn lead_time(&self) -> Duration {
        Duration::hours(i64::from(self.days) * 24 + i64::from(self.hours))
    }

    pub fn validate(&self) -> PolicyResult<()> {
        bounds(self.days.into(), "cutoffDays", 0, i64::from(u16::MAX))?;
        bounds(self.hours.into(), "cutoffHours", 0, 23)?;
        bounds(self.max_days_ahead.into(), "maxOrderDaysAhead", 1, i64::from(u16::MAX))?;
        Ok(())
    }
}

/// Weekly cutoff: one cutoff instant per week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyCutoff {
    pub day: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub orderable_days: WeekdaySet,
    /// 1 or 2
    pub max_weeks_ahead: u32,
}

impl WeeklyCutoff {
    /// Local time of the weekly cutoff
    pub fn time(&self) -> PolicyResult<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).ok_or_else(|| {
            PolicyError::Validation(format!(
                "weekly cutoff {:02}:{:02} is not a valid time",
                self.hour, self.minute
            ))
        })
    }

    pub fn validate(&self) -> PolicyResult<()> {
        bounds(self.hour.into(), "weeklyCutoffHour", 0, 23)?;
        bounds(self.minute.into(), "weeklyCutoffMinute", 0, 59)?;
        bounds(self.max_weeks_ahead.into(), "maxWeeksAhead", 1, 2)?;
        Ok(())
    }
}

/// The authoritative cutoff sub-configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffRule {
    PerShift(PerShiftCutoff),
    Weekly(WeeklyCutoff),
}

impl CutoffRule {
    pub fn mode(&self) -> CutoffMode {
        match self {
            Self::PerShift(_) => CutoffMode::PerShift,
            Self::Weekly(_) => CutoffMode::Weekly,
        }
    }

    pub fn validate(&self) -> PolicyResult<()> {
        match self {
            Self::PerShift(rule) => rule.validate(),
            Self::Weekly(rule) => rule.validate(),
        }
    }
}

/// Validated ordering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingPolicy {
    pub blacklist: BlacklistPolicy,
    pub cutoff: CutoffRule,
}

impl OrderingPolicy {
    /// Build from a settings record.
    ///
    /// Unknown mode or a missing field of the active mode is a
    /// [`PolicyError::Configuration`]; a present but out-of-range value is a
    /// [`PolicyError::Validation`]. Fields of the inactive mode are not read.
    pub fn from_settings(settings: &Settings) -> PolicyResult<Self> {
        let mode: CutoffMode = settings.cutoff_mode.parse()?;

        let blacklist = BlacklistPolicy {
            strikes: positive(settings.blacklist_strikes, "blacklistStrikes")?,
            duration_days: positive(settings.blacklist_duration, "blacklistDuration")?,
        };

        let cutoff = match mode {
            CutoffMode::PerShift => CutoffRule::PerShift(PerShiftCutoff {
                days: in_range(settings.cutoff_days, "cutoffDays", 0, i64::from(u16::MAX))?,
                hours: in_range(settings.cutoff_hours, "cutoffHours", 0, 23)?,
                max_days_ahead: positive(settings.max_order_days_ahead, "maxOrderDaysAhead")?,
            }),
            CutoffMode::Weekly => {
                let day = in_range(settings.weekly_cutoff_day, "weeklyCutoffDay", 0, 6)?;
                let days = settings
                    .orderable_days
                    .as_deref()
                    .ok_or_else(|| missing("orderableDays"))?;
                CutoffRule::Weekly(WeeklyCutoff {
                    day: weekday_from_number(day)?,
                    hour: in_range(settings.weekly_cutoff_hour, "weeklyCutoffHour", 0, 23)?,
                    minute: in_range(settings.weekly_cutoff_minute, "weeklyCutoffMinute", 0, 59)?,
                    orderable_days: WeekdaySet::parse(days)?,
                    max_weeks_ahead: in_range(settings.max_weeks_ahead, "maxWeeksAhead", 1, 2)?,
                })
            }
        };

        Ok(Self { blacklist, cutoff })
    }

    /// Range-check a policy that was built by hand
    pub fn validate(&self) -> PolicyResult<()> {
        bounds(self.blacklist.strikes.into(), "blacklistStrikes", 1, i64::from(u16::MAX))?;
        bounds(
            self.blacklist.duration_days.into(),
            "blacklistDuration",
            1,
            i64::from(u16::MAX),
        )?;
        self.cutoff.validate()
    }
}

impl TryFrom<&Settings> for OrderingPolicy {
    type Error = PolicyError;

    fn try_from(settings: &Settings) -> Result<Self, Self::Error> {
        Self::from_settings(settings)
    }
}

fn missing(field: &str) -> PolicyError {
    PolicyError::Configuration(format!("{field} is required for the active cutoff mode"))
}

fn in_range(value: Option<i64>, field: &str, min: i64, max: i64) -> PolicyResult<u32> {
    let v = value.ok_or_else(|| missing(field))?;
    bounds(v, field, min, max)?;
    // max never exceeds u16::MAX
    Ok(v as u32)
}

fn bounds(v: i64, field: &str, min: i64, max: i64) -> PolicyResult<()> {
    if v < min || v > max {
        return Err(PolicyError::Validation(format!(
            "{field} must be between {min} and {max}, got {v}"
        )));
    }
    Ok(())
}

fn positive(value: Option<i64>, field: &str) -> PolicyResult<u32> {
    in_range(value, field, 1, i64::from(u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly_settings() -> Settings {
        Settings {
            cutoff_mode: "weekly".to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_hand_built_rules_are_range_checked() {
        let mut rule = PerShiftCutoff {
            days: 0,
            hours: 99,
            max_days_ahead: 7,
        };
        assert!(matches!(rule.validate(), Err(PolicyError::Validation(_))));
        rule.hours = 23;
        assert!(rule.validate().is_ok());

        let mut weekly = WeeklyCutoff {
            day: Weekday::Fri,
            hour: 24,
            minute: 0,
            orderable_days: WeekdaySet::ALL,
            max_weeks_ahead: 1,
        };
        assert!(matches!(weekly.time(), Err(PolicyError::Validation(_))));
        assert!(weekly.validate().is_err());

        weekly.hour = 17;
        weekly.minute = 45;
        assert_eq!(weekly.time().unwrap(), NaiveTime::from_hms_opt(17, 45, 0).unwrap());
        weekly.max_weeks_ahead = 3;
        assert!(weekly.validate().is_err());

        let mut policy = Settings::default().policy().unwrap();
        assert!(policy.validate().is_ok());
        policy.blacklist.strikes = 0;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_default_is_per_shift() {
        let policy = Settings::default().policy().unwrap();
        assert_eq!(
            policy.cutoff,
            CutoffRule::PerShift(PerShiftCutoff {
                days: 0,
                hours: 6,
                max_days_ahead: 7
            })
        );
        assert_eq!(policy.blacklist.strikes, 3);
        assert_eq!(policy.blacklist.duration_days, 7);
    }

    #[test]
    fn test_weekly_policy() {
        let policy = weekly_settings().policy().unwrap();
        let CutoffRule::Weekly(rule) = policy.cutoff else {
            panic!("expected weekly rule");
        };
        assert_eq!(rule.day, Weekday::Fri);
        assert_eq!(rule.time().unwrap(), NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(rule.orderable_days.len(), 5);
        assert_eq!(rule.max_weeks_ahead, 1);
    }

    #[test]
    fn test_unknown_mode_is_configuration_error() {
        let mut s = Settings::default();
        s.cutoff_mode = "daily".to_string();
        assert!(matches!(s.policy(), Err(PolicyError::Configuration(_))));

        s.cutoff_mode = String::new();
        assert!(matches!(s.policy(), Err(PolicyError::Configuration(_))));
    }

    #[test]
    fn test_missing_active_field_is_configuration_error() {
        let mut s = Settings::default();
        s.cutoff_hours = None;
        assert!(matches!(s.policy(), Err(PolicyError::Configuration(_))));

        let mut s = weekly_settings();
        s.orderable_days = None;
        assert!(matches!(s.policy(), Err(PolicyError::Configuration(_))));
    }

    #[test]
    fn test_inactive_fields_are_ignored() {
        let mut s = Settings::default();
        s.weekly_cutoff_day = Some(42);
        s.orderable_days = Some("garbage".to_string());
        s.max_weeks_ahead = None;
        assert!(s.policy().is_ok());

        let mut s = weekly_settings();
        s.cutoff_hours = Some(99);
        s.max_order_days_ahead = None;
        assert!(s.policy().is_ok());
    }

    #[test]
    fn test_out_of_range_is_validation_error() {
        let mut s = Settings::default();
        s.cutoff_hours = Some(24);
        assert!(matches!(s.policy(), Err(PolicyError::Validation(_))));

        let mut s = Settings::default();
        s.blacklist_strikes = Some(0);
        assert!(matches!(s.policy(), Err(PolicyError::Validation(_))));

        let mut s = weekly_settings();
        s.max_weeks_ahead = Some(3);
        assert!(matches!(s.policy(), Err(PolicyError::Validation(_))));

        let mut s = weekly_settings();
        s.orderable_days = Some("1,9".to_string());
        assert!(matches!(s.policy(), Err(PolicyError::Validation(_))));
    }

    #[test]
    fn test_with_policy_keeps_inactive_config() {
        let mut stored = Settings::default();
        stored.weekly_cutoff_day = Some(3);

        let mut policy = stored.policy().unwrap();
        policy.cutoff = CutoffRule::PerShift(PerShiftCutoff {
            days: 1,
            hours: 2,
            max_days_ahead: 14,
        });
        let out = stored.with_policy(&policy);
        assert_eq!(out.cutoff_days, Some(1));
        assert_eq!(out.cutoff_hours, Some(2));
        assert_eq!(out.max_order_days_ahead, Some(14));
        assert_eq!(out.weekly_cutoff_day, Some(3));
        assert_eq!(out.policy().unwrap(), policy);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{
            "cutoffMode": "weekly",
            "blacklistStrikes": 2,
            "blacklistDuration": 14,
            "weeklyCutoffDay": 5,
            "weeklyCutoffHour": 17,
            "weeklyCutoffMinute": 30,
            "orderableDays": "1,2,3,4,5",
            "maxWeeksAhead": 2
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.cutoff_days, None);
        let policy = s.policy().unwrap();
        assert_eq!(policy.cutoff.mode(), CutoffMode::Weekly);

        let out = serde_json::to_value(&s).unwrap();
        assert_eq!(out["cutoffMode"], "weekly");
        assert!(out.get("cutoffDays").is_none());
    }

    #[test]
    fn test_lead_time() {
        let rule = PerShiftCutoff {
            days: 1,
            hours: 6,
            max_days_ahead: 1,
        };
        assert_eq!(rule.lead_time(), Duration::hours(30));
    }
}
