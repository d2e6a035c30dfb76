//! Per-drop ordered, deduplicated entry collection.
//!
//! An `EntrySet` assumes a single writer at a time; the owning
//! [`DropState`](super::state::DropState) lives behind a per-drop mutex.

use std::collections::HashSet;

use thiserror::Error;

use super::ids::UserId;
use super::participant::Participant;

/// Expected reasons for an entry not being admitted.
///
/// These are never surfaced to the participant; the originating reaction is
/// not owned by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryRejection {
    #[error("drop is no longer collecting entries")]
    AlreadyCompleted,
    #[error("participant already entered")]
    Duplicate,
    #[error("drop is at capacity")]
    AtCapacity,
}

#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: Vec<Participant>,
    ids: HashSet<UserId>,
    /// `None` means unbounded.
    capacity: Option<usize>,
    sealed: bool,
}

impl EntrySet {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: Vec::new(),
            ids: HashSet::new(),
            capacity,
            sealed: false,
        }
    }

    /// Build a set from previously observed entries, keeping the first
    /// occurrence of each id and stopping at capacity.
    pub fn with_entries(
        capacity: Option<usize>,
        entries: impl IntoIterator<Item = Participant>,
    ) -> Self {
        let mut set = Self::new(capacity);
        for participant in entries {
            match set.add(participant) {
                Ok(()) | Err(EntryRejection::Duplicate) => {}
                Err(_) => break,
            }
        }
        set
    }

    /// Check whether `id` would be admitted, without admitting it.
    pub fn check(&self, id: &UserId) -> Result<(), EntryRejection> {
        if self.sealed {
            return Err(EntryRejection::AlreadyCompleted);
        }
        if self.ids.contains(id) {
            return Err(EntryRejection::Duplicate);
        }
        if self.is_full() {
            return Err(EntryRejection::AtCapacity);
        }
        Ok(())
    }

    pub fn add(&mut self, participant: Participant) -> Result<(), EntryRejection> {
        self.check(&participant.id)?;
        self.ids.insert(participant.id.clone());
        self.entries.push(participant);
        Ok(())
    }

    /// Remove a retracted entry. Returns whether anything was removed.
    pub fn remove(&mut self, id: &UserId) -> Result<bool, EntryRejection> {
        if self.sealed {
            return Err(EntryRejection::AlreadyCompleted);
        }
        if !self.ids.remove(id) {
            return Ok(false);
        }
        self.entries.retain(|p| &p.id != id);
        Ok(true)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.ids.contains(id)
    }

    /// Entries in insertion order.
    pub fn snapshot(&self) -> Vec<Participant> {
        self.entries.clone()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.entries.len() >= cap)
    }

    /// Stop admitting and removing entries. Irreversible.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}
