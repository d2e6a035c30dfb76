//! Authoritative in-memory state of one drop.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use wldrop_sdk::objects::DropStatus;

use super::entry_set::EntrySet;
use super::ids::{ChannelId, DropId, GuildId, UserId};
use super::participant::Participant;
use super::timer::TimerHandle;
use crate::entities::DropKind;

/// Stand-in capacity for unbounded drops when truncating observed entries.
pub const UNBOUNDED_ENTRY_SENTINEL: usize = 99_999;

/// Presentation data forwarded to the gateway as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDetails {
    pub project_name: String,
    pub description: Option<String>,
    pub discord_url: Option<String>,
    pub image_url: Option<String>,
    /// The entry signal kind.
    pub emoji: String,
}

/// A validated drop configuration, before it has an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropConfig {
    pub kind: DropKind,
    pub winner_count: u32,
    /// `0` means unbounded.
    pub max_entries: u32,
    pub require_gate: bool,
    pub creator_id: UserId,
    pub channel_id: ChannelId,
    pub guild_id: GuildId,
    pub details: DropDetails,
    pub started_at: time::OffsetDateTime,
    pub deadline: time::OffsetDateTime,
}

impl DropConfig {
    /// Maximum number of entries, `None` when deadline-bound.
    ///
    /// FCFS drops hold exactly `winner_count` entries. Raffles are capped by
    /// `max_entries` when it is set.
    pub fn capacity(&self) -> Option<usize> {
        match self.kind {
            DropKind::Fcfs => Some(self.winner_count as usize),
            DropKind::Raffle if self.max_entries > 0 => Some(self.max_entries as usize),
            DropKind::Raffle => None,
        }
    }

    /// Entry count that completes the drop before its deadline.
    pub fn threshold(&self) -> Option<usize> {
        self.capacity()
    }

    pub fn threshold_reached(&self, entries: usize) -> bool {
        self.threshold().is_some_and(|t| entries >= t)
    }

    pub fn signal_kind(&self) -> &str {
        &self.details.emoji
    }
}

/// Fixed settings of a drop that has an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropSettings {
    pub id: DropId,
    pub config: DropConfig,
}

impl std::ops::Deref for DropSettings {
    type Target = DropConfig;

    fn deref(&self) -> &DropConfig {
        &self.config
    }
}

/// Lifecycle phase.
///
/// `Collecting -> Completing -> Completed` on success, `Collecting ->
/// Cancelled` when the creator aborts. Only `Collecting` accepts triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Collecting,
    Completing,
    Completed,
    Cancelled,
}

impl From<Phase> for DropStatus {
    fn from(value: Phase) -> Self {
        match value {
            Phase::Collecting => DropStatus::Collecting,
            Phase::Completing => DropStatus::Completing,
            Phase::Completed => DropStatus::Completed,
            Phase::Cancelled => DropStatus::Cancelled,
        }
    }
}

/// Mutable part of a drop. Only reachable through [`DropHandle::lock`].
#[derive(Debug)]
pub struct DropState {
    pub entries: EntrySet,
    pub phase: Phase,
    pub winners: Vec<Participant>,
    pub timer: Option<TimerHandle>,
}

impl DropState {
    pub fn new(entries: EntrySet) -> Self {
        Self {
            entries,
            phase: Phase::Collecting,
            winners: Vec::new(),
            timer: None,
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.phase == Phase::Collecting
    }

    /// The at-most-once guard: leave `Collecting` for `Completing`.
    ///
    /// Returns `false` if another trigger already left `Collecting`.
    pub fn begin_completion(&mut self) -> bool {
        if !self.is_collecting() {
            return false;
        }
        self.phase = Phase::Completing;
        self.entries.seal();
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        true
    }

    /// Leave `Collecting` for `Cancelled`. Same guard as completion.
    pub fn begin_cancel(&mut self) -> bool {
        if !self.is_collecting() {
            return false;
        }
        self.phase = Phase::Cancelled;
        self.entries.seal();
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        true
    }

    pub fn finish(&mut self, winners: Vec<Participant>) {
        self.winners = winners;
        self.phase = Phase::Completed;
    }
}

/// A registered drop: immutable settings plus its serialized state.
///
/// The tokio mutex is fair, so signals for one drop are applied in the
/// order they started waiting.
#[derive(Debug)]
pub struct DropHandle {
    pub settings: Arc<DropSettings>,
    state: Mutex<DropState>,
}

impl DropHandle {
    pub fn new(settings: DropSettings, state: DropState) -> Self {
        Self {
            settings: Arc::new(settings),
            state: Mutex::new(state),
        }
    }

    pub fn id(&self) -> &DropId {
        &self.settings.id
    }

    pub async fn lock(&self) -> MutexGuard<'_, DropState> {
        self.state.lock().await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn config(kind: DropKind, winner_count: u32, max_entries: u32) -> DropConfig {
        let now = time::OffsetDateTime::now_utc();
        DropConfig {
            kind,
            winner_count,
            max_entries,
            require_gate: false,
            creator_id: UserId::from("1"),
            channel_id: ChannelId::from("2"),
            guild_id: GuildId::from("3"),
            details: DropDetails {
                project_name: "Project".to_string(),
                description: None,
                discord_url: None,
                image_url: None,
                emoji: "🎉".to_string(),
            },
            started_at: now,
            deadline: now + time::Duration::hours(1),
        }
    }

    #[test]
    fn test_collect_until_policy() {
        assert_eq!(config(DropKind::Fcfs, 3, 0).capacity(), Some(3));
        // max_entries does not apply to FCFS
        assert_eq!(config(DropKind::Fcfs, 3, 10).capacity(), Some(3));
        assert_eq!(config(DropKind::Raffle, 3, 10).threshold(), Some(10));
        assert_eq!(config(DropKind::Raffle, 3, 0).threshold(), None);

        assert!(config(DropKind::Fcfs, 2, 0).threshold_reached(2));
        assert!(!config(DropKind::Raffle, 2, 0).threshold_reached(1_000));
    }

    #[test]
    fn test_guard_allows_one_transition() {
        let mut state = DropState::new(EntrySet::new(Some(2)));
        assert!(state.begin_completion());
        assert!(!state.begin_completion());
        assert!(!state.begin_cancel());
        assert!(state.entries.is_sealed());
        state.finish(Vec::new());
        assert_eq!(state.phase, Phase::Completed);
    }

    #[test]
    fn test_cancel_blocks_completion() {
        let mut state = DropState::new(EntrySet::new(None));
        assert!(state.begin_cancel());
        assert!(!state.begin_completion());
        assert_eq!(state.phase, Phase::Cancelled);
    }
}
