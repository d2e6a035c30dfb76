//! ResumeManager.
//!
//! Runs once at startup, before signals are accepted. For every persisted
//! incomplete drop it re-reads who currently holds the entry signal and
//! either completes the drop (deadline passed or threshold met while the
//! process was down) or registers it again with a fresh timer.

use std::sync::Arc;

use itertools::Itertools;
use tracing::{error, info, warn};

use super::coordinator::{CompletionCoordinator, DropError};
use crate::collaborators::{ObservedSignals, TransportError};
use crate::config::DropPolicy;
use crate::drops::state::UNBOUNDED_ENTRY_SENTINEL;
use crate::drops::{DropHandle, DropSettings, DropState, EntrySet, Participant};
use crate::utils::deadline::is_overdue;

/// What happened to the persisted drops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeReport {
    /// Registered again and collecting.
    pub resumed: usize,
    /// Completed immediately.
    pub completed: usize,
    /// Announcement or creator gone; record deleted.
    pub orphaned: usize,
    /// Left untouched after a transient error, retried on the next start.
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resumed {
    Active,
    Completed,
    Orphaned,
    Skipped,
}

pub struct ResumeManager {
    coordinator: Arc<CompletionCoordinator>,
}

/// Entries worth keeping from a snapshot, in observed order.
///
/// Drops the announcement author, bots, banned users and repeats, then
/// truncates to the drop's capacity.
fn reconstruct_entries(
    settings: &DropSettings,
    observed: ObservedSignals,
    policy: &DropPolicy,
) -> Vec<Participant> {
    let limit = settings.capacity().unwrap_or(UNBOUNDED_ENTRY_SENTINEL);
    observed
        .entries
        .into_iter()
        .filter(|e| !e.is_bot)
        .map(|e| e.participant)
        .filter(|p| p.id != observed.author_id && !policy.is_banned(&p.id))
        .unique_by(|p| p.id.clone())
        .take(limit)
        .collect()
}

impl ResumeManager {
    pub fn new(coordinator: Arc<CompletionCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Rebuild the registry from the store.
    ///
    /// Only listing the records can fail; per-drop problems are logged and
    /// counted in the report.
    pub async fn resume_all(&self) -> Result<ResumeReport, DropError> {
        let records = self.coordinator.collaborators().store.list_incomplete().await?;
        info!(count = records.len(), "Resuming persisted drops");

        let policy = self.coordinator.policy().await;
        let mut report = ResumeReport::default();
        for settings in records {
            match self.resume_one(settings, &policy).await {
                Resumed::Active => report.resumed += 1,
                Resumed::Completed => report.completed += 1,
                Resumed::Orphaned => report.orphaned += 1,
                Resumed::Skipped => report.skipped += 1,
            }
        }

        info!(
            resumed = report.resumed,
            completed = report.completed,
            orphaned = report.orphaned,
            skipped = report.skipped,
            "Resume finished"
        );
        Ok(report)
    }

    async fn resume_one(&self, settings: DropSettings, policy: &DropPolicy) -> Resumed {
        let collaborators = self.coordinator.collaborators();
        let transport = &collaborators.transport;

        if self.coordinator.registry().contains(&settings.id).await {
            return Resumed::Active;
        }

        let observed = match transport
            .fetch_signal_snapshot(&settings.channel_id, &settings.id, settings.signal_kind())
            .await
        {
            Ok(observed) => observed,
            Err(TransportError::NotFound) => return self.orphan(&settings, "announcement").await,
            Err(e) => {
                warn!(drop_id = %settings.id, error = %e, "Failed to fetch signals, skipping drop");
                return Resumed::Skipped;
            }
        };

        match transport.resolve_user(&settings.creator_id).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(TransportError::NotFound) => {
                return self.orphan(&settings, "creator").await;
            }
            Err(e) => {
                warn!(drop_id = %settings.id, error = %e, "Failed to resolve creator, skipping drop");
                return Resumed::Skipped;
            }
        }

        let entries = reconstruct_entries(&settings, observed, policy);
        let now = time::OffsetDateTime::now_utc();
        let overdue = is_overdue(settings.deadline, now);
        let filled = settings.threshold_reached(entries.len());

        let capacity = settings.capacity();
        let handle = Arc::new(DropHandle::new(
            settings,
            DropState::new(EntrySet::with_entries(capacity, entries)),
        ));
        let id = handle.id().clone();

        if overdue || filled {
            let entries = {
                let mut state = handle.lock().await;
                state.begin_completion();
                state.entries.snapshot()
            };
            info!(drop_id = %id, overdue, filled, "Completing drop missed while offline");
            self.coordinator.finalize(&handle, entries).await;
            return Resumed::Completed;
        }

        match self.coordinator.activate(&handle).await {
            Ok(()) => {
                info!(
                    drop_id = %id,
                    entries = handle.lock().await.entries.len(),
                    "Drop resumed"
                );
                Resumed::Active
            }
            Err(e) => {
                error!(drop_id = %id, error = %e, "Failed to register resumed drop");
                Resumed::Skipped
            }
        }
    }

    async fn orphan(&self, settings: &DropSettings, missing: &'static str) -> Resumed {
        warn!(drop_id = %settings.id, missing, "Drop orphaned, deleting record");
        match self.coordinator.collaborators().store.delete(&settings.id).await {
            Ok(()) => Resumed::Orphaned,
            Err(e) => {
                error!(drop_id = %settings.id, error = %e, "Failed to delete orphaned drop");
                Resumed::Skipped
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::ObservedEntry;
    use crate::drops::{ChannelId, DropConfig, DropDetails, DropId, GuildId, UserId};
    use crate::entities::DropKind;

    fn settings(kind: DropKind, winner_count: u32, max_entries: u32) -> DropSettings {
        let now = time::OffsetDateTime::now_utc();
        DropSettings {
            id: DropId::from("900"),
            config: DropConfig {
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
                deadline: now,
            },
        }
    }

    fn observed(ids: &[(&str, bool)]) -> ObservedSignals {
        ObservedSignals {
            author_id: UserId::from("bot"),
            entries: ids
                .iter()
                .map(|(id, is_bot)| ObservedEntry {
                    participant: Participant::new(*id, *id),
                    is_bot: *is_bot,
                })
                .collect(),
        }
    }

    fn ids(entries: &[Participant]) -> Vec<&str> {
        entries.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_filters_author_bots_and_banned() {
        let mut policy = DropPolicy::default();
        policy.banlist.insert(UserId::from("banned"));
        let entries = reconstruct_entries(
            &settings(DropKind::Raffle, 2, 0),
            observed(&[
                ("bot", false),
                ("a", false),
                ("helper", true),
                ("banned", false),
                ("b", false),
                ("a", false),
            ]),
            &policy,
        );
        assert_eq!(ids(&entries), vec!["a", "b"]);
    }

    #[test]
    fn test_truncates_to_capacity_in_order() {
        let policy = DropPolicy::default();
        let snapshot = observed(&[("a", false), ("b", false), ("c", false), ("d", false)]);

        let fcfs = reconstruct_entries(&settings(DropKind::Fcfs, 2, 0), snapshot.clone(), &policy);
        assert_eq!(ids(&fcfs), vec!["a", "b"]);

        let raffle = reconstruct_entries(&settings(DropKind::Raffle, 1, 3), snapshot.clone(), &policy);
        assert_eq!(ids(&raffle), vec!["a", "b", "c"]);

        let unbounded = reconstruct_entries(&settings(DropKind::Raffle, 1, 0), snapshot, &policy);
        assert_eq!(unbounded.len(), 4);
    }
}
