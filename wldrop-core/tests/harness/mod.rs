//! In-memory collaborators and a ready-wired coordinator.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wldrop_core::collaborators::{
    ActivityTracker, AnnouncementTransport, DropStore, EligibilityGate, NotificationSink,
    ObservedEntry, ObservedSignals, StoreError, StoredDrop, TransportError,
};
use wldrop_core::config::{ConfigStore, DropPolicy};
use wldrop_core::drops::{
    ChannelId, DropConfig, DropDetails, DropId, DropRegistry, DropSettings, ExpiryTimer, GuildId,
    Participant, UserId,
};
use wldrop_core::entities::DropKind;
use wldrop_core::events::expiry_channel;
use wldrop_core::processors::{
    Collaborators, CompletionCoordinator, EntrySignal, ExpiryWatcher, NewDrop,
};
use wldrop_sdk::objects::{SignalAction, SignalOutcome};

pub const CREATOR: &str = "creator";
pub const AUTHOR: &str = "bot-author";
pub const SEED: u64 = 7;

#[derive(Default)]
pub struct MemoryTransport {
    next_id: AtomicU64,
    pub fail_register: AtomicBool,
    pub posted: Mutex<Vec<DropId>>,
    pub registered: Mutex<Vec<(DropId, String)>>,
    pub edited: Mutex<Vec<(DropId, bool)>>,
    pub deleted: Mutex<Vec<DropId>>,
    pub retracted: Mutex<Vec<(DropId, UserId)>>,
    snapshots: Mutex<HashMap<DropId, ObservedSignals>>,
    failing_snapshots: Mutex<HashSet<DropId>>,
    users: Mutex<HashSet<UserId>>,
}

impl MemoryTransport {
    pub fn set_snapshot(&self, id: &DropId, entries: &[(&str, bool)]) {
        let observed = ObservedSignals {
            author_id: UserId::from(AUTHOR),
            entries: entries
                .iter()
                .map(|(id, is_bot)| ObservedEntry {
                    participant: Participant::new(*id, format!("user-{id}")),
                    is_bot: *is_bot,
                })
                .collect(),
        };
        self.snapshots.lock().unwrap().insert(id.clone(), observed);
    }

    pub fn fail_snapshot(&self, id: &DropId) {
        self.failing_snapshots.lock().unwrap().insert(id.clone());
    }

    /// Make the next announcement reuse the first id ever handed out.
    pub fn rewind_ids(&self) {
        self.next_id.store(0, Ordering::SeqCst);
    }

    pub fn add_user(&self, id: &str) {
        self.users.lock().unwrap().insert(UserId::from(id));
    }

    pub fn remove_user(&self, id: &str) {
        self.users.lock().unwrap().remove(&UserId::from(id));
    }

    pub fn retracted_users(&self, drop: &DropId) -> Vec<String> {
        self.retracted
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, _)| d == drop)
            .map(|(_, u)| u.to_string())
            .collect()
    }
}

#[async_trait]
impl AnnouncementTransport for MemoryTransport {
    async fn post_announcement(&self, _config: &DropConfig) -> Result<DropId, TransportError> {
        let id = DropId::from(format!("{}", 1000 + self.next_id.fetch_add(1, Ordering::SeqCst)));
        self.posted.lock().unwrap().push(id.clone());
        Ok(id)
    }

    async fn register_signal_kind(
        &self,
        _channel_id: &ChannelId,
        announcement_id: &DropId,
        signal_kind: &str,
    ) -> Result<(), TransportError> {
        if self.fail_register.load(Ordering::SeqCst) {
            return Err(TransportError::UnsupportedSignalKind);
        }
        self.registered
            .lock()
            .unwrap()
            .push((announcement_id.clone(), signal_kind.to_string()));
        Ok(())
    }

    async fn edit_announcement(
        &self,
        announcement_id: &DropId,
        _config: &DropConfig,
        ended: bool,
    ) -> Result<(), TransportError> {
        self.edited
            .lock()
            .unwrap()
            .push((announcement_id.clone(), ended));
        Ok(())
    }

    async fn delete_announcement(
        &self,
        _channel_id: &ChannelId,
        announcement_id: &DropId,
    ) -> Result<(), TransportError> {
        self.deleted.lock().unwrap().push(announcement_id.clone());
        Ok(())
    }

    async fn retract_signal(
        &self,
        _channel_id: &ChannelId,
        announcement_id: &DropId,
        participant_id: &UserId,
        _signal_kind: &str,
    ) -> Result<(), TransportError> {
        self.retracted
            .lock()
            .unwrap()
            .push((announcement_id.clone(), participant_id.clone()));
        Ok(())
    }

    async fn fetch_signal_snapshot(
        &self,
        _channel_id: &ChannelId,
        announcement_id: &DropId,
        _signal_kind: &str,
    ) -> Result<ObservedSignals, TransportError> {
        if self.failing_snapshots.lock().unwrap().contains(announcement_id) {
            return Err(TransportError::Failed("gateway timed out".to_string()));
        }
        self.snapshots
            .lock()
            .unwrap()
            .get(announcement_id)
            .cloned()
            .ok_or(TransportError::NotFound)
    }

    async fn resolve_user(&self, user_id: &UserId) -> Result<Option<Participant>, TransportError> {
        let known = self.users.lock().unwrap().contains(user_id);
        Ok(known.then(|| Participant::new(user_id.clone(), user_id.as_str())))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub drops: Mutex<HashMap<DropId, StoredDrop>>,
    pub completed_writes: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_save: AtomicBool,
}

impl MemoryStore {
    pub fn insert(&self, settings: DropSettings) {
        self.drops.lock().unwrap().insert(
            settings.id.clone(),
            StoredDrop {
                settings,
                completed: false,
                winners: Vec::new(),
                entries: Vec::new(),
            },
        );
    }

    pub fn record(&self, id: &DropId) -> Option<StoredDrop> {
        self.drops.lock().unwrap().get(id).cloned()
    }

    /// Remove a record behind the coordinator's back.
    pub fn forget(&self, id: &DropId) {
        self.drops.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl DropStore for MemoryStore {
    async fn save(&self, settings: &DropSettings) -> Result<(), StoreError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.insert(settings.clone());
        Ok(())
    }

    async fn delete(&self, id: &DropId) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.drops.lock().unwrap().remove(id);
        Ok(())
    }

    async fn mark_completed(
        &self,
        id: &DropId,
        winners: &[Participant],
        entries: &[Participant],
    ) -> Result<(), StoreError> {
        self.completed_writes.fetch_add(1, Ordering::SeqCst);
        if let Some(record) = self.drops.lock().unwrap().get_mut(id) {
            record.completed = true;
            record.winners = winners.to_vec();
            record.entries = entries.to_vec();
        }
        Ok(())
    }

    async fn list_incomplete(&self) -> Result<Vec<DropSettings>, StoreError> {
        let mut pending: Vec<_> = self
            .drops
            .lock()
            .unwrap()
            .values()
            .filter(|d| !d.completed)
            .map(|d| d.settings.clone())
            .collect();
        pending.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pending)
    }

    async fn get(&self, id: &DropId) -> Result<Option<StoredDrop>, StoreError> {
        Ok(self.record(id))
    }
}

#[derive(Default)]
pub struct MemoryGate {
    eligible: Mutex<HashSet<(GuildId, UserId)>>,
    pub unavailable: AtomicBool,
}

impl MemoryGate {
    pub fn allow(&self, guild: &str, user: &str) {
        self.eligible
            .lock()
            .unwrap()
            .insert((GuildId::from(guild), UserId::from(user)));
    }
}

#[async_trait]
impl EligibilityGate for MemoryGate {
    async fn is_eligible(&self, guild_id: &GuildId, user_id: &UserId) -> Result<bool, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(self
            .eligible
            .lock()
            .unwrap()
            .contains(&(guild_id.clone(), user_id.clone())))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub announced: Mutex<Vec<(DropId, Vec<Participant>)>>,
    pub creator_notified: AtomicUsize,
    pub fail: AtomicBool,
    delay: Mutex<Option<Duration>>,
}

impl RecordingNotifier {
    /// Hold every winner announcement for `delay` before recording it.
    pub fn slow_down(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn announcements(&self) -> usize {
        self.announced.lock().unwrap().len()
    }

    pub fn winners_of(&self, id: &DropId) -> Option<Vec<String>> {
        self.announced
            .lock()
            .unwrap()
            .iter()
            .find(|(d, _)| d == id)
            .map(|(_, w)| w.iter().map(|p| p.id.to_string()).collect())
    }
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn announce_winners(
        &self,
        drop: &DropSettings,
        winners: &[Participant],
    ) -> Result<(), TransportError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Failed("channel unavailable".to_string()));
        }
        self.announced
            .lock()
            .unwrap()
            .push((drop.id.clone(), winners.to_vec()));
        Ok(())
    }

    async fn notify_creator(
        &self,
        _drop: &DropSettings,
        _winners: &[Participant],
    ) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::Failed("dm closed".to_string()));
        }
        self.creator_notified.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct CountingActivity {
    pub active: AtomicI64,
}

impl CountingActivity {
    pub fn active(&self) -> i64 {
        self.active.load(Ordering::SeqCst)
    }
}

impl ActivityTracker for CountingActivity {
    fn drop_opened(&self) {
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    fn drop_closed(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub transport: Arc<MemoryTransport>,
    pub store: Arc<MemoryStore>,
    pub gate: Arc<MemoryGate>,
    pub notifier: Arc<RecordingNotifier>,
    pub activity: Arc<CountingActivity>,
    pub policy: ConfigStore<DropPolicy>,
    pub coordinator: Arc<CompletionCoordinator>,
    shutdown_tx: watch::Sender<bool>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl Harness {
    /// Must be called inside a tokio runtime; spawns the expiry watcher.
    pub fn new() -> Self {
        Self::with_policy(DropPolicy::default())
    }

    pub fn with_policy(policy: DropPolicy) -> Self {
        let transport = Arc::new(MemoryTransport::default());
        transport.add_user(CREATOR);
        let store = Arc::new(MemoryStore::default());
        let gate = Arc::new(MemoryGate::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let activity = Arc::new(CountingActivity::default());
        let policy = ConfigStore::new(policy);

        let (expiry_tx, expiry_rx) = expiry_channel();
        let collaborators = Collaborators {
            transport: transport.clone(),
            gate: gate.clone(),
            store: store.clone(),
            notifier: notifier.clone(),
            activity: activity.clone(),
        };
        let coordinator = Arc::new(
            CompletionCoordinator::new(
                Arc::new(DropRegistry::new()),
                collaborators,
                ExpiryTimer::new(expiry_tx),
                policy.clone(),
            )
            .with_rng_seed(SEED),
        );

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let watcher =
            tokio::spawn(ExpiryWatcher::new(coordinator.clone(), expiry_rx, shutdown_rx).run());

        Self {
            transport,
            store,
            gate,
            notifier,
            activity,
            policy,
            coordinator,
            shutdown_tx,
            watcher: Mutex::new(Some(watcher)),
        }
    }

    pub fn request(kind: DropKind, winner_count: u32, max_entries: u32) -> NewDrop {
        NewDrop {
            kind,
            winner_count,
            max_entries,
            duration: Some(time::Duration::minutes(10)),
            require_gate: false,
            creator_id: UserId::from(CREATOR),
            channel_id: ChannelId::from("channel"),
            guild_id: GuildId::from("guild"),
            project_name: "Project".to_string(),
            description: None,
            discord_url: None,
            image_url: None,
            emoji: None,
        }
    }

    pub async fn create(&self, request: NewDrop) -> DropId {
        self.coordinator
            .create_drop(request)
            .await
            .unwrap()
            .id
            .clone()
    }

    pub fn signal(id: &DropId, user: &str, kind: &str, action: SignalAction) -> EntrySignal {
        EntrySignal {
            announcement_id: id.clone(),
            participant: Participant::new(user, format!("user-{user}")),
            signal_kind: kind.to_string(),
            action,
            is_bot: false,
        }
    }

    pub async fn enter(&self, id: &DropId, user: &str) -> SignalOutcome {
        self.coordinator
            .on_external_signal(Self::signal(id, user, "🎉", SignalAction::Added))
            .await
    }

    pub async fn withdraw(&self, id: &DropId, user: &str) -> SignalOutcome {
        self.coordinator
            .on_external_signal(Self::signal(id, user, "🎉", SignalAction::Removed))
            .await
    }

    pub async fn is_active(&self, id: &DropId) -> bool {
        self.coordinator.registry().contains(id).await
    }

    /// A persisted drop that was collecting when the process stopped.
    pub fn persisted(
        id: &str,
        kind: DropKind,
        winner_count: u32,
        max_entries: u32,
        deadline_in: time::Duration,
    ) -> DropSettings {
        let now = time::OffsetDateTime::now_utc();
        DropSettings {
            id: DropId::from(id),
            config: DropConfig {
                kind,
                winner_count,
                max_entries,
                require_gate: false,
                creator_id: UserId::from(CREATOR),
                channel_id: ChannelId::from("channel"),
                guild_id: GuildId::from("guild"),
                details: DropDetails {
                    project_name: "Project".to_string(),
                    description: None,
                    discord_url: None,
                    image_url: None,
                    emoji: "🎉".to_string(),
                },
                started_at: now - time::Duration::hours(1),
                deadline: now + deadline_in,
            },
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Shut the watcher down and wait for it to return.
    pub async fn stop(&self) {
        self.shutdown();
        let watcher = self.watcher.lock().unwrap().take();
        if let Some(watcher) = watcher {
            watcher.await.unwrap();
        }
    }
}

/// Let spawned tasks run until the runtime is idle.
pub async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
    tokio::time::sleep(std::time::Duration::from_millis(1)).await;
}
