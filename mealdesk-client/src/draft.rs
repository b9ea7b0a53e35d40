//! Local working copies of server records
//!
//! A [`Draft`] pairs the record as last fetched (or saved) with the copy
//! being edited. Saving sends only what changed and rebases the draft on
//! the record the server returns.

use shared::eligibility::PolicyResult;
use shared::models::{OrderingPolicy, Settings, Shift, ShiftId, ShiftPayload};

use crate::admin::AdminClient;
use crate::client::HttpClient;
use crate::error::ClientResult;

#[derive(Debug, Clone, PartialEq)]
pub struct Draft<T> {
    baseline: T,
    current: T,
}

impl<T: Clone + PartialEq> Draft<T> {
    pub fn new(baseline: T) -> Self {
        Self {
            current: baseline.clone(),
            baseline,
        }
    }

    /// Record as last seen on the server
    pub fn baseline(&self) -> &T {
        &self.baseline
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.current);
    }

    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    /// Editing a value back to its baseline makes the draft clean again
    pub fn is_dirty(&self) -> bool {
        self.current != self.baseline
    }

    pub fn revert(&mut self) {
        self.current = self.baseline.clone();
    }

    /// Rebase on the record the server returned
    pub fn commit(&mut self, saved: T) {
        self.current = saved.clone();
        self.baseline = saved;
    }
}

/// Counts of requests issued by [`ShiftBoard::save`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveSummary {
    pub updated: usize,
    pub created: usize,
}

/// Editable list of shifts plus new shifts not yet created
#[derive(Debug, Clone, Default)]
pub struct ShiftBoard {
    shifts: Vec<Draft<Shift>>,
    pending: Vec<ShiftPayload>,
}

impl ShiftBoard {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self {
            shifts: shifts.into_iter().map(Draft::new).collect(),
            pending: Vec::new(),
        }
    }

    /// Fetch every shift, inactive ones included
    pub async fn load<C: HttpClient>(client: &AdminClient<C>) -> ClientResult<Self> {
        Ok(Self::new(client.list_shifts(true).await?))
    }

    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().map(Draft::current)
    }

    pub fn get(&self, id: &ShiftId) -> Option<&Shift> {
        self.draft(id).map(Draft::current)
    }

    fn draft(&self, id: &ShiftId) -> Option<&Draft<Shift>> {
        self.shifts.iter().find(|d| &d.baseline().id == id)
    }

    fn draft_mut(&mut self, id: &ShiftId) -> Option<&mut Draft<Shift>> {
        self.shifts.iter_mut().find(|d| &d.baseline().id == id)
    }

    /// Edit the mutable fields of a shift; returns `false` for an unknown id
    pub fn edit(&mut self, id: &ShiftId, f: impl FnOnce(&mut ShiftPayload)) -> bool {
        let Some(draft) = self.draft_mut(id) else {
            return false;
        };
        let mut payload = draft.current().payload();
        f(&mut payload);
        draft.edit(|shift| shift.apply(payload));
        true
    }

    /// Shifts are deactivated, never deleted
    pub fn set_active(&mut self, id: &ShiftId, active: bool) -> bool {
        self.edit(id, |p| p.is_active = active)
    }

    pub fn add_new(&mut self, payload: ShiftPayload) {
        self.pending.push(payload);
    }

    pub fn pending(&self) -> &[ShiftPayload] {
        &self.pending
    }

    pub fn dirty_ids(&self) -> Vec<ShiftId> {
        self.shifts
            .iter()
            .filter(|d| d.is_dirty())
            .map(|d| d.baseline().id.clone())
            .collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty() || self.shifts.iter().any(Draft::is_dirty)
    }

    /// Drop every local edit and pending shift
    pub fn revert_all(&mut self) {
        self.shifts.iter_mut().for_each(Draft::revert);
        self.pending.clear();
    }

    /// `PUT` each dirty shift, then `POST` each pending one.
    ///
    /// Every payload is validated before the first request. On a failed
    /// request the drafts saved so far are rebased and the rest stay dirty.
    pub async fn save<C: HttpClient>(&mut self, client: &AdminClient<C>) -> ClientResult<SaveSummary> {
        for draft in self.shifts.iter().filter(|d| d.is_dirty()) {
            draft.current().payload().validate()?;
        }
        for payload in &self.pending {
            payload.validate()?;
        }

        let mut summary = SaveSummary::default();
        for draft in self.shifts.iter_mut().filter(|d| d.is_dirty()) {
            let id = draft.baseline().id.clone();
            let saved = client.update_shift(&id, &draft.current().payload()).await?;
            draft.commit(saved);
            summary.updated += 1;
        }

        while let Some(payload) = self.pending.first() {
            let saved = client.create_shift(payload).await?;
            self.pending.remove(0);
            self.shifts.push(Draft::new(saved));
            summary.created += 1;
        }

        tracing::info!(
            updated = summary.updated,
            created = summary.created,
            "Saved shift changes"
        );
        Ok(summary)
    }
}

/// Draft of the settings record
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    draft: Draft<Settings>,
}

impl SettingsDraft {
    pub fn new(settings: Settings) -> Self {
        Self {
            draft: Draft::new(settings),
        }
    }

    pub async fn load<C: HttpClient>(client: &AdminClient<C>) -> ClientResult<Self> {
        Ok(Self::new(client.get_settings().await?))
    }

    pub fn current(&self) -> &Settings {
        self.draft.current()
    }

    pub fn baseline(&self) -> &Settings {
        self.draft.baseline()
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut Settings)) {
        self.draft.edit(f);
    }

    /// Write a typed policy into the working copy
    pub fn set_policy(&mut self, policy: &OrderingPolicy) {
        let updated = self.draft.current().with_policy(policy);
        self.draft.set(updated);
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.is_dirty()
    }

    pub fn revert(&mut self) {
        self.draft.revert();
    }

    /// Policy the working copy would produce if saved
    pub fn policy(&self) -> PolicyResult<OrderingPolicy> {
        self.draft.current().policy()
    }

    /// Returns `false` without a request when nothing changed
    pub async fn save<C: HttpClient>(&mut self, client: &AdminClient<C>) -> ClientResult<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        self.policy()?;
        let saved = client.update_settings(self.draft.current()).await?;
        self.draft.commit(saved);
        Ok(true)
    }
}
