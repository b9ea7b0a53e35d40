//! Orderable weekday set
//!
//! Stored on the wire as a comma-separated list of weekday numbers
//! (0 = Sunday .. 6 = Saturday), e.g. `"1,2,3,4,5"`.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::eligibility::{PolicyError, PolicyResult};

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Weekday number as stored in settings (0 = Sunday).
pub fn weekday_number(day: Weekday) -> u32 {
    day.num_days_from_sunday()
}

/// Inverse of [`weekday_number`].
pub fn weekday_from_number(n: u32) -> PolicyResult<Weekday> {
    ALL_DAYS
        .get(n as usize)
        .copied()
        .ok_or_else(|| PolicyError::Validation(format!("weekday {n} is out of range (0-6)")))
}

/// Set of weekdays, one bit per day (bit 0 = Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);
    pub const ALL: WeekdaySet = WeekdaySet(0b111_1111);

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= 1 << weekday_number(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !(1 << weekday_number(day));
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << weekday_number(day)) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Days in ascending storage order (Sunday first).
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(|d| self.contains(*d))
    }

    /// Parse the stored form.
    ///
    /// Whitespace around entries, empty entries and duplicates are tolerated;
    /// anything that is not an integer 0-6 is rejected.
    pub fn parse(s: &str) -> PolicyResult<Self> {
        let mut set = Self::EMPTY;
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let n: u32 = token.parse().map_err(|_| {
                PolicyError::Validation(format!("orderable day '{token}' is not a number"))
            })?;
            set.insert(weekday_from_number(n)?);
        }
        Ok(set)
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for day in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}", weekday_number(day))?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for WeekdaySet {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WeekdaySet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekdays() {
        let set = WeekdaySet::parse("1,2,3,4,5").unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.contains(Weekday::Mon));
        assert!(set.contains(Weekday::Fri));
        assert!(!set.contains(Weekday::Sun));
        assert!(!set.contains(Weekday::Sat));
    }

    #[test]
    fn test_parse_is_lenient_about_layout() {
        let set = WeekdaySet::parse(" 5, 1 ,1,,").unwrap();
        assert_eq!(set.to_string(), "1,5");
        assert!(WeekdaySet::parse("").unwrap().is_empty());
        assert!(WeekdaySet::parse("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(matches!(
            WeekdaySet::parse("1,x"),
            Err(PolicyError::Validation(_))
        ));
        assert!(matches!(
            WeekdaySet::parse("7"),
            Err(PolicyError::Validation(_))
        ));
        assert!(WeekdaySet::parse("-1").is_err());
    }

    #[test]
    fn test_display_is_sorted_sunday_first() {
        let set: WeekdaySet = [Weekday::Sat, Weekday::Sun, Weekday::Wed]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "0,3,6");
        assert_eq!(WeekdaySet::ALL.to_string(), "0,1,2,3,4,5,6");
        assert_eq!(WeekdaySet::EMPTY.to_string(), "");
    }

    #[test]
    fn test_insert_remove() {
        let mut set = WeekdaySet::EMPTY;
        set.insert(Weekday::Tue);
        set.insert(Weekday::Tue);
        assert_eq!(set.len(), 1);
        set.remove(Weekday::Tue);
        assert!(set.is_empty());
    }

    #[test]
    fn test_serde_as_string() {
        let set: WeekdaySet = serde_json::from_str("\"6,0\"").unwrap();
        assert_eq!(serde_json::to_string(&set).unwrap(), "\"0,6\"");
    }
}
