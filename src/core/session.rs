use crate::core::aggregate::{tabulate, RosterStats};
use crate::core::store::{RecordSelector, RecordStore};
use crate::domain::model::{PersonRecord, RecordId, SeedRecord, Size};
use crate::utils::error::{RosterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmState {
    #[default]
    Idle,
    PendingConfirm(RecordId),
}

/// What a delete request did to the confirmation state.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteRequest {
    /// Waiting for `confirm` or `cancel` on this record.
    Pending(PersonRecord),
    /// The same record was requested twice; back to idle.
    Withdrawn(PersonRecord),
}

/// All mutable state for one operator. Every mutation goes through
/// `&mut self`, so at most one is in flight at a time.
#[derive(Debug, Default)]
pub struct Session {
    store: RecordStore,
    confirm: ConfirmState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: &[SeedRecord]) -> Self {
        Self {
            store: RecordStore::with_seed(seed),
            confirm: ConfirmState::Idle,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn confirm_state(&self) -> ConfirmState {
        self.confirm
    }

    pub fn add<S: AsRef<str>>(
        &mut self,
        name: &str,
        hat_size: Size,
        cloth_size: Size,
        allergies: &[S],
    ) -> Result<RecordId> {
        self.store.add(name, hat_size, cloth_size, allergies)
    }

    /// Rows as displayed: sorted by name.
    pub fn rows(&self) -> Vec<&PersonRecord> {
        self.store.sorted()
    }

    /// Resolves a 1-based row of the sorted view to its record id.
    pub fn row_id(&self, row: usize) -> Result<RecordId> {
        row.checked_sub(1)
            .and_then(|index| self.rows().get(index).map(|r| r.id))
            .ok_or_else(|| RosterError::not_found(format!("row {}", row)))
    }

    pub fn stats(&self) -> RosterStats {
        tabulate(self.store.list())
    }

    /// Starts confirmation for `id`. Requesting the record that is already
    /// pending withdraws the request. Requesting a different record replaces it.
    pub fn request_delete(&mut self, id: RecordId) -> Result<DeleteRequest> {
        let record = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| RosterError::not_found(id.to_string()))?;

        match self.confirm {
            ConfirmState::PendingConfirm(pending) if pending == id => {
                self.confirm = ConfirmState::Idle;
                tracing::debug!("Delete request for {} withdrawn", id);
                Ok(DeleteRequest::Withdrawn(record))
            }
            _ => {
                self.confirm = ConfirmState::PendingConfirm(id);
                tracing::debug!("Awaiting confirmation to delete {}", id);
                Ok(DeleteRequest::Pending(record))
            }
        }
    }

    /// Deletes the pending record. The state returns to idle even when the
    /// record has disappeared in the meantime.
    pub fn confirm(&mut self) -> Result<PersonRecord> {
        let id = match std::mem::take(&mut self.confirm) {
            ConfirmState::PendingConfirm(id) => id,
            ConfirmState::Idle => {
                return Err(RosterError::command("There is no pending delete to confirm"))
            }
        };
        self.store.delete(&RecordSelector::Id(id))
    }

    /// Drops the pending request without deleting. Returns the id that was pending.
    pub fn cancel(&mut self) -> Option<RecordId> {
        match std::mem::take(&mut self.confirm) {
            ConfirmState::PendingConfirm(id) => {
                tracing::debug!("Delete of {} cancelled", id);
                Some(id)
            }
            ConfirmState::Idle => None,
        }
    }

    /// Direct deletion without confirmation, for scripted use.
    pub fn delete(&mut self, selector: &RecordSelector) -> Result<PersonRecord> {
        let removed = self.store.delete(selector)?;
        if self.confirm == ConfirmState::PendingConfirm(removed.id) {
            self.confirm = ConfirmState::Idle;
        }
        Ok(removed)
    }
}
