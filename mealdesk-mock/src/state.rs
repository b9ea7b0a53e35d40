//! In-memory store

use std::collections::BTreeMap;

use shared::models::{Settings, Shift, ShiftId, ShiftPayload};
use shared::{AppError, AppResult};
use tokio::sync::RwLock;

#[derive(Debug)]
struct Store {
    shifts: BTreeMap<i64, Shift>,
    next_id: i64,
    settings: Settings,
}

impl Store {
    fn insert(&mut self, payload: ShiftPayload) -> Shift {
        let id = self.next_id;
        self.next_id += 1;

        let mut shift = Shift {
            id: ShiftId::from(id),
            name: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            meal_price: 0,
            is_active: true,
        };
        shift.apply(payload);
        self.shifts.insert(id, shift.clone());
        shift
    }
}

/// Shared backend state. Callers validate before writing.
#[derive(Debug)]
pub struct AppState {
    store: RwLock<Store>,
}

impl AppState {
    /// No shifts, default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            store: RwLock::new(Store {
                shifts: BTreeMap::new(),
                next_id: 1,
                settings,
            }),
        }
    }

    /// Breakfast, lunch and dinner, plus an inactive late shift
    pub fn with_demo_shifts() -> Self {
        let mut store = Store {
            shifts: BTreeMap::new(),
            next_id: 1,
            settings: Settings::default(),
        };
        for (name, start, end, price, active) in [
            ("Breakfast", "07:00", "09:00", 25000, true),
            ("Lunch", "11:30", "13:30", 35000, true),
            ("Dinner", "18:00", "20:00", 35000, true),
            ("Late night", "22:00", "02:00", 30000, false),
        ] {
            store.insert(ShiftPayload {
                name: name.to_string(),
                start_time: start.to_string(),
                end_time: end.to_string(),
                meal_price: price,
                is_active: active,
            });
        }
        Self {
            store: RwLock::new(store),
        }
    }

    /// Shifts in id order
    pub async fn list_shifts(&self, include_inactive: bool) -> Vec<Shift> {
        self.store
            .read()
            .await
            .shifts
            .values()
            .filter(|s| include_inactive || s.is_active)
            .cloned()
            .collect()
    }

    pub async fn create_shift(&self, payload: ShiftPayload) -> Shift {
        self.store.write().await.insert(payload)
    }

    /// Full replacement of an existing shift
    pub async fn update_shift(&self, id: &str, payload: ShiftPayload) -> AppResult<Shift> {
        let key: i64 = id.parse().map_err(|_| AppError::shift_not_found(id))?;
        let mut store = self.store.write().await;
        let shift = store
            .shifts
            .get_mut(&key)
            .ok_or_else(|| AppError::shift_not_found(id))?;
        shift.apply(payload);
        Ok(shift.clone())
    }

    pub async fn settings(&self) -> Settings {
        self.store.read().await.settings.clone()
    }

    pub async fn replace_settings(&self, settings: Settings) -> Settings {
        let mut store = self.store.write().await;
        store.settings = settings;
        store.settings.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    fn payload(name: &str) -> ShiftPayload {
        ShiftPayload {
            name: name.to_string(),
            start_time: "11:30".to_string(),
            end_time: "13:30".to_string(),
            meal_price: 35000,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let state = AppState::new();
        let a = state.create_shift(payload("Lunch")).await;
        let b = state.create_shift(payload("Dinner")).await;
        assert_eq!(a.id, ShiftId::new("1"));
        assert_eq!(b.id, ShiftId::new("2"));
    }

    #[tokio::test]
    async fn test_list_hides_inactive() {
        let state = AppState::with_demo_shifts();
        assert_eq!(state.list_shifts(false).await.len(), 3);
        assert_eq!(state.list_shifts(true).await.len(), 4);
    }

    #[tokio::test]
    async fn test_update_unknown_shift() {
        let state = AppState::new();
        for id in ["42", "abc"] {
            let err = state.update_shift(id, payload("Lunch")).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ShiftNotFound);
        }
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let state = AppState::new();
        let created = state.create_shift(payload("Lunch")).await;

        let mut change = created.payload();
        change.is_active = false;
        change.meal_price = 40000;
        let updated = state.update_shift(created.id.as_str(), change).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert!(!updated.is_active);
        assert_eq!(updated.meal_price, 40000);
        assert!(state.list_shifts(false).await.is_empty());
    }
}
