//! Typed operations over the admin REST API

use chrono::{DateTime, NaiveDate, TimeZone};
use shared::eligibility::{Eligibility, evaluate};
use shared::models::{Settings, Shift, ShiftId, ShiftList, ShiftPayload};

use crate::client::{HttpClient, NetworkHttpClient};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

const SHIFTS: &str = "/api/shifts";
const SETTINGS: &str = "/api/settings";

/// `/api/shifts/{id}` with the id percent-encoded as a single segment
fn shift_path(id: &ShiftId) -> ClientResult<String> {
    let mut url = reqwest::Url::parse(&format!("http://localhost{SHIFTS}"))
        .map_err(|e| ClientError::Internal(format!("Failed to build shift path: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Internal("Failed to build shift path".into()))?
        .push(id.as_str());
    Ok(url.path().to_string())
}

/// Admin API client over any [`HttpClient`] transport
#[derive(Debug, Clone)]
pub struct AdminClient<C: HttpClient> {
    http: C,
}

impl AdminClient<NetworkHttpClient> {
    /// Network client built from `config`
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<C: HttpClient> AdminClient<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub fn transport(&self) -> &C {
        &self.http
    }

    /// `GET /api/shifts`; inactive shifts are only listed on request
    pub async fn list_shifts(&self, include_inactive: bool) -> ClientResult<Vec<Shift>> {
        let path = if include_inactive {
            format!("{SHIFTS}?includeInactive=true")
        } else {
            SHIFTS.to_string()
        };
        let list: ShiftList = self.http.get(&path).await?;
        Ok(list.shifts)
    }

    /// `POST /api/shifts`
    pub async fn create_shift(&self, payload: &ShiftPayload) -> ClientResult<Shift> {
        payload.validate()?;
        let shift: Shift = self.http.post(SHIFTS, payload).await?;
        tracing::info!(id = %shift.id, name = %shift.name, "Created shift");
        Ok(shift)
    }

    /// `PUT /api/shifts/{id}` (full replacement)
    pub async fn update_shift(&self, id: &ShiftId, payload: &ShiftPayload) -> ClientResult<Shift> {
        payload.validate()?;
        let shift: Shift = self.http.put(&shift_path(id)?, payload).await?;
        tracing::info!(id = %shift.id, "Updated shift");
        Ok(shift)
    }

    /// `GET /api/settings`
    pub async fn get_settings(&self) -> ClientResult<Settings> {
        self.http.get(SETTINGS).await
    }

    /// `PUT /api/settings`
    ///
    /// Settings whose active cutoff mode does not form a valid policy are
    /// rejected with [`ClientError::Policy`] before anything is sent.
    pub async fn update_settings(&self, settings: &Settings) -> ClientResult<Settings> {
        let policy = settings.policy()?;
        let saved: Settings = self.http.put(SETTINGS, settings).await?;
        tracing::info!(mode = %policy.cutoff.mode(), "Updated settings");
        Ok(saved)
    }

    /// Fetch the shift and the current settings, then evaluate locally.
    pub async fn check_eligibility<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        shift_id: &ShiftId,
        date: NaiveDate,
    ) -> ClientResult<Eligibility<Tz>> {
        let shift = self
            .list_shifts(true)
            .await?
            .into_iter()
            .find(|s| &s.id == shift_id)
            .ok_or_else(|| ClientError::NotFound(format!("shift {shift_id}")))?;
        let settings = self.get_settings().await?;
        Ok(evaluate(now, &shift, date, &settings)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_path_encodes_id() {
        assert_eq!(shift_path(&ShiftId::new("7")).unwrap(), "/api/shifts/7");
        assert_eq!(shift_path(&ShiftId::new("x#y")).unwrap(), "/api/shifts/x%23y");
        assert_eq!(shift_path(&ShiftId::new("a/b")).unwrap(), "/api/shifts/a%2Fb");
        assert_eq!(shift_path(&ShiftId::new("shift 7")).unwrap(), "/api/shifts/shift%207");
        assert_eq!(shift_path(&ShiftId::new("a?b")).unwrap(), "/api/shifts/a%3Fb");
    }
}
