//! Interfaces the coordinator drives but does not implement.
//!
//! The chat transport, winner notifications and presence display live in
//! the server crate; the Postgres store and wallet gate live in
//! [`postgres`].

pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::drops::{ChannelId, DropConfig, DropId, DropSettings, GuildId, Participant, UserId};

#[derive(Debug, Error)]
pub enum TransportError {
    /// The platform refused the entry signal kind (e.g. an unknown emoji).
    #[error("signal kind is not supported by the platform")]
    UnsupportedSignalKind,
    /// The announcement (or user) no longer exists.
    #[error("announcement or user not found")]
    NotFound,
    #[error("transport failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid stored drop {id}: {reason}")]
    InvalidRecord { id: String, reason: String },
}

/// One reaction holder as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedEntry {
    pub participant: Participant,
    pub is_bot: bool,
}

/// Everyone currently holding the entry signal on an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedSignals {
    pub author_id: UserId,
    /// In the order the platform reports them.
    pub entries: Vec<ObservedEntry>,
}

/// A persisted drop as loaded back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDrop {
    pub settings: DropSettings,
    pub completed: bool,
    pub winners: Vec<Participant>,
    pub entries: Vec<Participant>,
}

/// The chat platform as seen by the coordinator.
#[async_trait]
pub trait AnnouncementTransport: Send + Sync {
    /// Post the announcement. Its id becomes the drop id.
    async fn post_announcement(&self, config: &DropConfig) -> Result<DropId, TransportError>;

    /// Place the entry signal on the announcement so participants can click it.
    async fn register_signal_kind(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        signal_kind: &str,
    ) -> Result<(), TransportError>;

    async fn edit_announcement(
        &self,
        announcement_id: &DropId,
        config: &DropConfig,
        ended: bool,
    ) -> Result<(), TransportError>;

    async fn delete_announcement(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
    ) -> Result<(), TransportError>;

    async fn retract_signal(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        participant_id: &UserId,
        signal_kind: &str,
    ) -> Result<(), TransportError>;

    /// [`TransportError::NotFound`] means the announcement is gone.
    async fn fetch_signal_snapshot(
        &self,
        channel_id: &ChannelId,
        announcement_id: &DropId,
        signal_kind: &str,
    ) -> Result<ObservedSignals, TransportError>;

    async fn resolve_user(&self, user_id: &UserId) -> Result<Option<Participant>, TransportError>;
}

#[async_trait]
pub trait EligibilityGate: Send + Sync {
    async fn is_eligible(&self, guild_id: &GuildId, user_id: &UserId) -> Result<bool, StoreError>;
}

/// Durable drop records, atomic per id.
#[async_trait]
pub trait DropStore: Send + Sync {
    async fn save(&self, settings: &DropSettings) -> Result<(), StoreError>;

    async fn delete(&self, id: &DropId) -> Result<(), StoreError>;

    async fn mark_completed(
        &self,
        id: &DropId,
        winners: &[Participant],
        entries: &[Participant],
    ) -> Result<(), StoreError>;

    async fn list_incomplete(&self) -> Result<Vec<DropSettings>, StoreError>;

    async fn get(&self, id: &DropId) -> Result<Option<StoredDrop>, StoreError>;
}

/// Best-effort winner delivery. Failures are logged by the caller.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn announce_winners(
        &self,
        drop: &DropSettings,
        winners: &[Participant],
    ) -> Result<(), TransportError>;

    async fn notify_creator(
        &self,
        drop: &DropSettings,
        winners: &[Participant],
    ) -> Result<(), TransportError>;
}

/// Presence display of how many drops are running.
pub trait ActivityTracker: Send + Sync {
    fn drop_opened(&self);
    fn drop_closed(&self);
}
