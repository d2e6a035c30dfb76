//! CompletionCoordinator.
//!
//! Owns every lifecycle transition of a drop:
//! - creating it (announcement, signal registration, persistence, timer)
//! - applying entry and removal signals under the drop's mutex
//! - completing it exactly once, whichever of threshold or deadline wins
//! - cancelling it on the creator's request
//!
//! The per-drop [`Phase`] is the only guard. A trigger that finds the drop
//! outside `Collecting` does nothing. The trigger that moves it out runs the
//! rest of the transition on a tracked task, so a caller that gives up
//! half-way cannot leave the drop stuck in `Completing`.

use std::sync::{Arc, Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use wldrop_sdk::objects::{CreateDropRequest, SignalAction, SignalOutcome, SignalRequest};

use crate::collaborators::{
    ActivityTracker, AnnouncementTransport, DropStore, EligibilityGate, NotificationSink,
    StoreError, TransportError,
};
use crate::config::{ConfigStore, DropPolicy};
use crate::drops::{
    ChannelId, DropConfig, DropDetails, DropHandle, DropId, DropRegistry, DropSettings,
    DropState, EntryRejection, EntrySet, ExpiryTimer, GuildId, Participant, Phase,
    RegistryError, UserId, select_winners,
};
use crate::entities::DropKind;
use crate::utils::links::normalize_discord_url;

/// Signal kind used when the creator does not pick one.
pub const DEFAULT_SIGNAL_KIND: &str = "🎉";

/// Signal kind that cancels a drop when its creator places it.
pub const CANCEL_SIGNAL_KIND: &str = "❌";

#[derive(Debug, Error)]
pub enum DropError {
    #[error("invalid drop: {0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("drop {0} is already registered")]
    AlreadyRegistered(DropId),
}

impl From<RegistryError> for DropError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::AlreadyRegistered(id) => DropError::AlreadyRegistered(id),
        }
    }
}

impl From<EntryRejection> for SignalOutcome {
    fn from(value: EntryRejection) -> Self {
        match value {
            EntryRejection::AlreadyCompleted => SignalOutcome::AlreadyCompleted,
            EntryRejection::Duplicate => SignalOutcome::Duplicate,
            EntryRejection::AtCapacity => SignalOutcome::AtCapacity,
        }
    }
}

/// The collaborators a coordinator drives.
#[derive(Clone)]
pub struct Collaborators {
    pub transport: Arc<dyn AnnouncementTransport>,
    pub gate: Arc<dyn EligibilityGate>,
    pub store: Arc<dyn DropStore>,
    pub notifier: Arc<dyn NotificationSink>,
    pub activity: Arc<dyn ActivityTracker>,
}

/// A creation request as issued by the command layer, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrop {
    pub kind: DropKind,
    pub winner_count: u32,
    pub max_entries: u32,
    /// `None` falls back to the policy's default duration.
    pub duration: Option<time::Duration>,
    pub require_gate: bool,
    pub creator_id: UserId,
    pub channel_id: ChannelId,
    pub guild_id: GuildId,
    pub project_name: String,
    pub description: Option<String>,
    pub discord_url: Option<String>,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
}

impl From<CreateDropRequest> for NewDrop {
    fn from(value: CreateDropRequest) -> Self {
        Self {
            kind: value.kind.into(),
            winner_count: value.winner_count,
            max_entries: value.max_entries,
            duration: value
                .duration_secs
                .map(|secs| time::Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX))),
            require_gate: value.require_gate,
            creator_id: value.creator_id.into(),
            channel_id: value.channel_id.into(),
            guild_id: value.guild_id.into(),
            project_name: value.project_name,
            description: value.description,
            discord_url: value.discord_url,
            image_url: value.image_url,
            emoji: value.emoji,
        }
    }
}

/// A reaction placed on or withdrawn from an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySignal {
    pub announcement_id: DropId,
    pub participant: Participant,
    pub signal_kind: String,
    pub action: SignalAction,
    pub is_bot: bool,
}

impl From<SignalRequest> for EntrySignal {
    fn from(value: SignalRequest) -> Self {
        Self {
            announcement_id: value.announcement_id.into(),
            participant: value.participant.into(),
            signal_kind: value.signal_kind,
            action: value.action,
            is_bot: value.is_bot,
        }
    }
}

/// Point-in-time view of a drop, active or finished.
#[derive(Debug, Clone)]
pub struct DropSnapshot {
    pub settings: Arc<DropSettings>,
    pub phase: Phase,
    pub entry_count: usize,
    pub winners: Vec<Participant>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Check a creation request against the policy and fix its deadline.
pub fn validate_new_drop(
    request: NewDrop,
    policy: &DropPolicy,
    now: time::OffsetDateTime,
) -> Result<DropConfig, DropError> {
    if request.winner_count == 0 {
        return Err(DropError::Validation(
            "winner count must be at least 1".to_string(),
        ));
    }
    if request.winner_count > policy.max_winner_count {
        return Err(DropError::Validation(format!(
            "winner count must not exceed {}",
            policy.max_winner_count
        )));
    }

    let project_name = request.project_name.trim().to_string();
    if project_name.is_empty() {
        return Err(DropError::Validation("project name is required".to_string()));
    }

    let emoji = match request.emoji {
        None => DEFAULT_SIGNAL_KIND.to_string(),
        Some(emoji) => {
            let emoji = emoji.trim();
            if emoji.is_empty() {
                return Err(DropError::Validation("emoji must not be blank".to_string()));
            }
            if emoji == CANCEL_SIGNAL_KIND {
                return Err(DropError::Validation(format!(
                    "{CANCEL_SIGNAL_KIND} is reserved for cancelling"
                )));
            }
            emoji.to_string()
        }
    };

    let duration = match request.duration {
        Some(duration) if duration <= time::Duration::ZERO => {
            return Err(DropError::Validation(
                "duration must be positive".to_string(),
            ));
        }
        Some(duration) => duration,
        None => policy.default_duration,
    };
    let deadline = now
        .checked_add(duration)
        .ok_or_else(|| DropError::Validation("duration is too long".to_string()))?;

    let max_entries = match request.kind {
        DropKind::Fcfs => 0,
        DropKind::Raffle => request.max_entries,
    };

    Ok(DropConfig {
        kind: request.kind,
        winner_count: request.winner_count,
        max_entries,
        require_gate: request.require_gate,
        creator_id: request.creator_id,
        channel_id: request.channel_id,
        guild_id: request.guild_id,
        details: DropDetails {
            project_name,
            description: blank_to_none(request.description),
            discord_url: request
                .discord_url
                .as_deref()
                .and_then(normalize_discord_url),
            image_url: blank_to_none(request.image_url),
            emoji,
        },
        started_at: now,
        deadline,
    })
}

pub struct CompletionCoordinator {
    registry: Arc<DropRegistry>,
    collaborators: Collaborators,
    timer: ExpiryTimer,
    policy: ConfigStore<DropPolicy>,
    rng: Arc<Mutex<StdRng>>,
    settlements: Mutex<JoinSet<()>>,
}

impl CompletionCoordinator {
    pub fn new(
        registry: Arc<DropRegistry>,
        collaborators: Collaborators,
        timer: ExpiryTimer,
        policy: ConfigStore<DropPolicy>,
    ) -> Self {
        Self {
            registry,
            collaborators,
            timer,
            policy,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
            settlements: Mutex::new(JoinSet::new()),
        }
    }

    /// Use a seeded rng so raffles are reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn registry(&self) -> &Arc<DropRegistry> {
        &self.registry
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    pub async fn policy(&self) -> DropPolicy {
        self.policy.get().await
    }

    /// Validate, announce, persist and start collecting.
    ///
    /// Any announcement posted before a failure is deleted again.
    pub async fn create_drop(&self, request: NewDrop) -> Result<Arc<DropSettings>, DropError> {
        let policy = self.policy.get().await;
        let config = validate_new_drop(request, &policy, time::OffsetDateTime::now_utc())?;
        let transport = &self.collaborators.transport;

        let id = transport.post_announcement(&config).await?;
        debug!(drop_id = %id, "Announcement posted");

        if let Err(e) = transport
            .register_signal_kind(&config.channel_id, &id, config.signal_kind())
            .await
        {
            warn!(
                drop_id = %id,
                signal_kind = config.signal_kind(),
                error = %e,
                "Failed to register entry signal, rolling back announcement"
            );
            self.rollback_announcement(&config.channel_id, &id).await;
            return Err(e.into());
        }

        let settings = DropSettings { id, config };
        if let Err(e) = self.collaborators.store.save(&settings).await {
            error!(drop_id = %settings.id, error = %e, "Failed to persist drop, rolling back announcement");
            self.rollback_announcement(&settings.channel_id, &settings.id)
                .await;
            return Err(e.into());
        }

        let state = DropState::new(EntrySet::new(settings.capacity()));
        let handle = Arc::new(DropHandle::new(settings, state));
        if let Err(e) = self.activate(&handle).await {
            let settings = &handle.settings;
            error!(drop_id = %settings.id, error = %e, "Failed to activate drop, rolling back");
            if let Err(e) = self.collaborators.store.delete(&settings.id).await {
                error!(drop_id = %settings.id, error = %e, "Failed to delete record during rollback");
            }
            self.rollback_announcement(&settings.channel_id, &settings.id)
                .await;
            return Err(e);
        }

        let settings = Arc::clone(&handle.settings);
        info!(
            drop_id = %settings.id,
            kind = %settings.kind,
            winner_count = settings.winner_count,
            max_entries = settings.max_entries,
            deadline = %settings.deadline,
            "Drop created"
        );
        Ok(settings)
    }

    async fn rollback_announcement(&self, channel_id: &ChannelId, id: &DropId) {
        if let Err(e) = self
            .collaborators
            .transport
            .delete_announcement(channel_id, id)
            .await
        {
            error!(drop_id = %id, error = %e, "Failed to delete announcement during rollback");
        }
    }

    /// Register a collecting drop and arm its timer.
    ///
    /// The drop's mutex is held throughout so no signal can reach it before
    /// the timer is in place.
    pub(crate) async fn activate(&self, handle: &Arc<DropHandle>) -> Result<(), DropError> {
        let mut state = handle.lock().await;
        self.registry.register(Arc::clone(handle)).await?;
        state.timer = Some(
            self.timer
                .arm_at(handle.id().clone(), handle.settings.deadline),
        );
        drop(state);
        self.collaborators.activity.drop_opened();
        Ok(())
    }

    /// Apply an entry, removal or cancel signal.
    ///
    /// Per-signal failures are absorbed into the returned outcome.
    pub async fn on_external_signal(&self, signal: EntrySignal) -> SignalOutcome {
        let Some(handle) = self.registry.get(&signal.announcement_id).await else {
            debug!(announcement_id = %signal.announcement_id, "Signal for unknown drop");
            return SignalOutcome::UnknownDrop;
        };

        if signal.is_bot {
            return SignalOutcome::Ignored;
        }

        if signal.signal_kind == CANCEL_SIGNAL_KIND {
            return match signal.action {
                SignalAction::Added => self.cancel(&handle, &signal.participant.id).await,
                SignalAction::Removed => SignalOutcome::Ignored,
            };
        }

        if signal.signal_kind != handle.settings.signal_kind() {
            return SignalOutcome::Ignored;
        }

        match signal.action {
            SignalAction::Added => self.add_entry(&handle, signal.participant).await,
            SignalAction::Removed => self.remove_entry(&handle, &signal.participant.id).await,
        }
    }

    async fn add_entry(&self, handle: &Arc<DropHandle>, participant: Participant) -> SignalOutcome {
        let settings = &handle.settings;

        if self.policy.read().await.is_banned(&participant.id) {
            info!(drop_id = %settings.id, user_id = %participant.id, "Banned user signal retracted");
            self.retract(settings, &participant.id).await;
            return SignalOutcome::Banned;
        }

        let mut state = handle.lock().await;
        if let Err(rejection) = state.entries.check(&participant.id) {
            debug!(
                drop_id = %settings.id,
                user_id = %participant.id,
                reason = %rejection,
                "Entry rejected"
            );
            return rejection.into();
        }

        if settings.require_gate {
            match self
                .collaborators
                .gate
                .is_eligible(&settings.guild_id, &participant.id)
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    drop(state);
                    info!(drop_id = %settings.id, user_id = %participant.id, "Entry failed gate, retracting");
                    self.retract(settings, &participant.id).await;
                    return SignalOutcome::GateRejected;
                }
                Err(e) => {
                    warn!(
                        drop_id = %settings.id,
                        user_id = %participant.id,
                        error = %e,
                        "Eligibility check failed, entry not counted"
                    );
                    return SignalOutcome::GateUnavailable;
                }
            }
        }

        let user_id = participant.id.clone();
        if let Err(rejection) = state.entries.add(participant) {
            return rejection.into();
        }
        info!(
            drop_id = %settings.id,
            user_id = %user_id,
            entries = state.entries.len(),
            "Entry accepted"
        );

        if !settings.threshold_reached(state.entries.len()) || !state.begin_completion() {
            return SignalOutcome::Accepted;
        }
        let entries = state.entries.snapshot();
        drop(state);

        info!(drop_id = %settings.id, "Entry threshold reached");
        self.finalize(handle, entries).await;
        SignalOutcome::Completed
    }

    async fn remove_entry(&self, handle: &Arc<DropHandle>, user_id: &UserId) -> SignalOutcome {
        let mut state = handle.lock().await;
        match state.entries.remove(user_id) {
            Ok(true) => {
                info!(
                    drop_id = %handle.id(),
                    user_id = %user_id,
                    entries = state.entries.len(),
                    "Entry withdrawn"
                );
                SignalOutcome::Removed
            }
            Ok(false) => SignalOutcome::Ignored,
            Err(rejection) => rejection.into(),
        }
    }

    async fn retract(&self, settings: &DropSettings, user_id: &UserId) {
        if let Err(e) = self
            .collaborators
            .transport
            .retract_signal(
                &settings.channel_id,
                &settings.id,
                user_id,
                settings.signal_kind(),
            )
            .await
        {
            warn!(drop_id = %settings.id, user_id = %user_id, error = %e, "Failed to retract signal");
        }
    }

    /// Handle a fired expiry timer. Returns whether this completed the drop.
    pub async fn on_expired(&self, id: &DropId) -> bool {
        let Some(handle) = self.registry.get(id).await else {
            debug!(drop_id = %id, "Expiry for inactive drop ignored");
            return false;
        };

        let entries = {
            let mut state = handle.lock().await;
            if !state.begin_completion() {
                debug!(drop_id = %id, phase = ?state.phase, "Expiry lost the race");
                return false;
            }
            state.entries.snapshot()
        };

        info!(drop_id = %id, "Drop deadline reached");
        self.finalize(&handle, entries).await;
        true
    }

    /// Cancel on the creator's behalf.
    pub async fn on_creator_cancel(&self, announcement_id: &DropId, requester_id: &UserId) -> SignalOutcome {
        match self.registry.get(announcement_id).await {
            Some(handle) => self.cancel(&handle, requester_id).await,
            None => SignalOutcome::UnknownDrop,
        }
    }

    async fn cancel(&self, handle: &Arc<DropHandle>, requester_id: &UserId) -> SignalOutcome {
        let settings = &handle.settings;
        if requester_id != &settings.creator_id {
            debug!(drop_id = %settings.id, user_id = %requester_id, "Cancel by non-creator ignored");
            return SignalOutcome::NotCreator;
        }

        {
            let mut state = handle.lock().await;
            if !state.begin_cancel() {
                info!(drop_id = %settings.id, phase = ?state.phase, "Cancel after completion started, ignored");
                return SignalOutcome::AlreadyCompleted;
            }
        }

        self.detach(&settings.id, self.settler().discard(Arc::clone(handle)))
            .await;
        SignalOutcome::Cancelled
    }

    /// The success path. The caller must have moved the drop to `Completing`.
    pub(crate) async fn finalize(&self, handle: &Arc<DropHandle>, entries: Vec<Participant>) {
        self.detach(
            handle.id(),
            self.settler().complete(Arc::clone(handle), entries),
        )
        .await;
    }

    fn settler(&self) -> Settler {
        Settler {
            registry: Arc::clone(&self.registry),
            collaborators: self.collaborators.clone(),
            rng: Arc::clone(&self.rng),
        }
    }

    /// Run `work` on a tracked task and wait for it.
    ///
    /// Dropping the returned future does not abort the task.
    async fn detach<F>(&self, id: &DropId, work: F) -> Option<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        {
            let mut settlements = self
                .settlements
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            while let Some(joined) = settlements.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "Settlement task failed");
                }
            }
            settlements.spawn(async move {
                let _ = result_tx.send(work.await);
            });
        }

        match result_rx.await {
            Ok(output) => Some(output),
            Err(_) => {
                error!(drop_id = %id, "Settlement task ended without finishing");
                None
            }
        }
    }

    /// Wait until every completion and cancellation in flight has finished.
    ///
    /// Called on shutdown before the store goes away. Drops still collecting
    /// stay persisted and are picked up by the next resume.
    pub async fn drain(&self) {
        loop {
            let mut settlements = std::mem::take(
                &mut *self
                    .settlements
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            if settlements.is_empty() {
                break;
            }
            debug!(pending = settlements.len(), "Waiting for settlements");
            while let Some(joined) = settlements.join_next().await {
                if let Err(e) = joined {
                    error!(error = %e, "Settlement task failed");
                }
            }
        }

        self.registry
            .for_each(|handle| {
                info!(drop_id = %handle.id(), deadline = %handle.settings.deadline, "Drop left for next resume");
            })
            .await;
    }

    /// State of an active drop, or of a finished one from the store.
    pub async fn drop_status(&self, id: &DropId) -> Result<Option<DropSnapshot>, DropError> {
        if let Some(handle) = self.registry.get(id).await {
            let state = handle.lock().await;
            return Ok(Some(DropSnapshot {
                settings: Arc::clone(&handle.settings),
                phase: state.phase,
                entry_count: state.entries.len(),
                winners: state.winners.clone(),
            }));
        }

        let stored = self.collaborators.store.get(id).await?;
        Ok(stored
            .filter(|s| s.completed)
            .map(|s| DropSnapshot {
                settings: Arc::new(s.settings),
                phase: Phase::Completed,
                entry_count: s.entries.len(),
                winners: s.winners,
            }))
    }

    pub async fn active_drops(&self) -> usize {
        self.registry.count().await
    }
}

/// Owned handles for finishing a drop away from the triggering task.
struct Settler {
    registry: Arc<DropRegistry>,
    collaborators: Collaborators,
    rng: Arc<Mutex<StdRng>>,
}

impl Settler {
    /// Notification and announcement edits are best-effort; the store write
    /// and deregistration always happen.
    async fn complete(self, handle: Arc<DropHandle>, entries: Vec<Participant>) {
        let settings = &handle.settings;
        let winners = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            select_winners(
                settings.kind,
                settings.winner_count as usize,
                &entries,
                &mut *rng,
            )
        };
        info!(
            drop_id = %settings.id,
            entries = entries.len(),
            winners = winners.len(),
            "Drop completing"
        );

        let notifier = &self.collaborators.notifier;
        if let Err(e) = notifier.announce_winners(settings, &winners).await {
            error!(drop_id = %settings.id, error = %e, "Failed to announce winners");
        }
        if let Err(e) = notifier.notify_creator(settings, &winners).await {
            error!(drop_id = %settings.id, error = %e, "Failed to notify creator");
        }

        if let Err(e) = self
            .collaborators
            .store
            .mark_completed(&settings.id, &winners, &entries)
            .await
        {
            error!(drop_id = %settings.id, error = %e, "Failed to persist completed drop");
        }

        if let Err(e) = self
            .collaborators
            .transport
            .edit_announcement(&settings.id, &settings.config, true)
            .await
        {
            warn!(drop_id = %settings.id, error = %e, "Failed to mark announcement as ended");
        }

        handle.lock().await.finish(winners);
        if self.registry.unregister(&settings.id).await.is_some() {
            self.collaborators.activity.drop_closed();
        }

        info!(drop_id = %settings.id, "Drop completed");
    }

    async fn discard(self, handle: Arc<DropHandle>) {
        let settings = &handle.settings;
        if let Err(e) = self.collaborators.store.delete(&settings.id).await {
            error!(drop_id = %settings.id, error = %e, "Failed to delete cancelled drop record");
        }
        if let Err(e) = self
            .collaborators
            .transport
            .delete_announcement(&settings.channel_id, &settings.id)
            .await
        {
            warn!(drop_id = %settings.id, error = %e, "Failed to delete cancelled announcement");
        }
        if self.registry.unregister(&settings.id).await.is_some() {
            self.collaborators.activity.drop_closed();
        }

        info!(drop_id = %settings.id, "Drop cancelled by creator");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewDrop {
        NewDrop {
            kind: DropKind::Raffle,
            winner_count: 3,
            max_entries: 10,
            duration: None,
            require_gate: false,
            creator_id: UserId::from("1"),
            channel_id: ChannelId::from("2"),
            guild_id: GuildId::from("3"),
            project_name: "  Project  ".to_string(),
            description: Some("   ".to_string()),
            discord_url: Some("abcdef".to_string()),
            image_url: None,
            emoji: None,
        }
    }

    fn invalid(request: NewDrop) -> bool {
        matches!(
            validate_new_drop(request, &DropPolicy::default(), time::OffsetDateTime::now_utc()),
            Err(DropError::Validation(_))
        )
    }

    #[test]
    fn test_validate_fills_defaults() {
        let now = time::OffsetDateTime::now_utc();
        let config = validate_new_drop(request(), &DropPolicy::default(), now).unwrap();
        assert_eq!(config.details.project_name, "Project");
        assert_eq!(config.details.emoji, DEFAULT_SIGNAL_KIND);
        assert_eq!(config.details.description, None);
        assert_eq!(
            config.details.discord_url.as_deref(),
            Some("https://discord.gg/abcdef")
        );
        assert_eq!(config.deadline - now, time::Duration::hours(1));
        assert_eq!(config.max_entries, 10);
    }

    #[test]
    fn test_validate_ignores_fcfs_max_entries() {
        let mut req = request();
        req.kind = DropKind::Fcfs;
        let config =
            validate_new_drop(req, &DropPolicy::default(), time::OffsetDateTime::now_utc())
                .unwrap();
        assert_eq!(config.max_entries, 0);
        assert_eq!(config.capacity(), Some(3));
    }

    #[test]
    fn test_validate_rejects_bad_requests() {
        let mut req = request();
        req.winner_count = 0;
        assert!(invalid(req));

        let mut req = request();
        req.winner_count = DropPolicy::DEFAULT_MAX_WINNER_COUNT + 1;
        assert!(invalid(req));

        let mut req = request();
        req.project_name = " ".to_string();
        assert!(invalid(req));

        let mut req = request();
        req.emoji = Some(CANCEL_SIGNAL_KIND.to_string());
        assert!(invalid(req));

        let mut req = request();
        req.emoji = Some(String::new());
        assert!(invalid(req));

        let mut req = request();
        req.duration = Some(time::Duration::ZERO);
        assert!(invalid(req));

        let mut req = request();
        req.duration = Some(time::Duration::seconds(i64::MAX));
        assert!(invalid(req));
    }

    #[test]
    fn test_rejection_outcomes() {
        assert_eq!(
            SignalOutcome::from(EntryRejection::AtCapacity),
            SignalOutcome::AtCapacity
        );
        assert_eq!(
            SignalOutcome::from(EntryRejection::AlreadyCompleted),
            SignalOutcome::AlreadyCompleted
        );
    }
}
