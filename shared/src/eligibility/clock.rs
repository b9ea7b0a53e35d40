//! Business time zone binding

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{Eligibility, PolicyError, PolicyResult, evaluate};
use crate::models::{Settings, Shift};

/// Evaluates eligibility against the wall clock in the business time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    tz: Tz,
}

impl BusinessClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from an IANA zone name such as `Europe/Madrid`
    pub fn from_name(name: &str) -> PolicyResult<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|e| PolicyError::Configuration(format!("unknown time zone '{name}': {e}")))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Current instant in the business time zone
    pub fn now(&self) -> DateTime<Tz> {
        self.at(Utc::now())
    }

    /// Any UTC instant in the business time zone
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Today's local date
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// [`evaluate`] at the current instant
    pub fn evaluate_now(
        &self,
        shift: &Shift,
        date: NaiveDate,
        settings: &Settings,
    ) -> PolicyResult<Eligibility<Tz>> {
        evaluate(&self.now(), shift, date, settings)
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}
