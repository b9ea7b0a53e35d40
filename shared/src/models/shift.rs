//! Shift Model (meal service windows)

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ClockTime;
use crate::eligibility::PolicyResult;
use crate::error::{AppError, AppResult, ErrorCode};

/// Entity names (shift name shown on menus and receipts)
pub const MAX_NAME_LEN: usize = 200;

/// Opaque shift identifier
///
/// Backends hand out either integers or strings; both are accepted and the
/// id is always sent back as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ShiftId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ShiftId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ShiftId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self::from(n),
            RawId::Str(s) => Self(s),
        })
    }
}

/// Shift record - a named meal service window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    /// Service start, `HH:MM`
    pub start_time: String,
    /// Service end, `HH:MM`; may be earlier than start for overnight service
    pub end_time: String,
    /// Meal price in the smallest currency unit
    pub meal_price: i64,
    /// Inactive shifts are kept but cannot be ordered
    pub is_active: bool,
}

impl Shift {
    /// Full-replacement payload carrying this shift's current values
    pub fn payload(&self) -> ShiftPayload {
        ShiftPayload {
            name: self.name.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            meal_price: self.meal_price,
            is_active: self.is_active,
        }
    }

    /// Replace every mutable field with the payload's values
    pub fn apply(&mut self, payload: ShiftPayload) {
        self.name = payload.name;
        self.start_time = payload.start_time;
        self.end_time = payload.end_time;
        self.meal_price = payload.meal_price;
        self.is_active = payload.is_active;
    }

    pub fn start(&self) -> PolicyResult<ClockTime> {
        ClockTime::parse(&self.start_time)
    }

    pub fn end(&self) -> PolicyResult<ClockTime> {
        ClockTime::parse(&self.end_time)
    }
}

/// Create / full-replace payload (`POST /api/shifts`, `PUT /api/shifts/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPayload {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub meal_price: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ShiftPayload {
    /// Validate a payload before it is sent or stored.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "name must not be empty",
            )
            .with_detail("field", "name"));
        }
        let name_len = self.name.chars().count();
        if name_len > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "name is too long ({name_len} chars, max {MAX_NAME_LEN})"
            ))
            .with_detail("field", "name"));
        }

        let start = parse_field(&self.start_time, "startTime")?;
        let end = parse_field(&self.end_time, "endTime")?;
        if start == end {
            return Err(AppError::new(ErrorCode::ShiftEmptyWindow)
                .with_detail("startTime", self.start_time.clone())
                .with_detail("endTime", self.end_time.clone()));
        }

        if self.meal_price < 0 {
            return Err(AppError::with_message(
                ErrorCode::ShiftInvalidPrice,
                format!("mealPrice must be non-negative, got {}", self.meal_price),
            )
            .with_detail("field", "mealPrice"));
        }
        Ok(())
    }
}

fn parse_field(value: &str, field: &str) -> AppResult<ClockTime> {
    ClockTime::parse(value).map_err(|e| {
        AppError::with_message(ErrorCode::ShiftInvalidTime, format!("{field}: {e}"))
            .with_detail("field", field)
    })
}

/// `GET /api/shifts` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftList {
    pub shifts: Vec<Shift>,
}
