//! Objects sent from the coordinator to the chat gateway.
//!
//! The gateway owns the chat platform connection: it renders announcements,
//! reacts, removes reactions and delivers winner messages. The coordinator
//! only ever sends it structured data.

use serde::{Deserialize, Serialize};

use super::drops::{DropKind, Participant};
use crate::signature::Signature;

/// Everything the gateway needs to render (or re-render) an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementContent {
    pub channel_id: String,
    pub guild_id: String,
    pub creator_id: String,
    pub kind: DropKind,
    pub project_name: String,
    pub description: Option<String>,
    pub discord_url: Option<String>,
    pub image_url: Option<String>,
    pub emoji: String,
    pub winner_count: u32,
    pub max_entries: u32,
    pub require_gate: bool,
    /// Unix timestamp of the deadline.
    pub deadline: i64,
    /// `true` once the drop is over; the gateway switches to its "ended" form.
    pub ended: bool,
}

impl Signature for AnnouncementContent {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAnnouncementResponse {
    pub announcement_id: String,
}

/// Points at an existing announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRef {
    pub channel_id: String,
    pub announcement_id: String,
}

impl Signature for AnnouncementRef {}

/// Ask the gateway to place the entry reaction on an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSignalKind {
    pub channel_id: String,
    pub announcement_id: String,
    pub signal_kind: String,
}

impl Signature for RegisterSignalKind {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditAnnouncement {
    pub announcement_id: String,
    pub content: AnnouncementContent,
}

impl Signature for EditAnnouncement {}

/// Remove one participant's reaction from an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetractSignal {
    pub channel_id: String,
    pub announcement_id: String,
    pub participant_id: String,
    pub signal_kind: String,
}

impl Signature for RetractSignal {}

/// Ask for everyone currently holding a given reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRequest {
    pub channel_id: String,
    pub announcement_id: String,
    pub signal_kind: String,
}

impl Signature for SnapshotRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedParticipant {
    #[serde(flatten)]
    pub participant: Participant,
    #[serde(default)]
    pub is_bot: bool,
}

/// Reaction holders in the order the platform reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    /// Author of the announcement message (the bot account).
    pub author_id: String,
    pub participants: Vec<ObservedParticipant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveUserRequest {
    pub user_id: String,
}

impl Signature for ResolveUserRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveUserResponse {
    pub user: Option<Participant>,
}

/// Public winner announcement, posted as a reply to the announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnersNotification {
    pub drop_id: String,
    pub channel_id: String,
    pub guild_id: String,
    pub kind: DropKind,
    pub project_name: String,
    pub discord_url: Option<String>,
    pub emoji: String,
    pub winners: Vec<Participant>,
}

impl Signature for WinnersNotification {}

/// One line of the creator's winner list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerRow {
    #[serde(flatten)]
    pub participant: Participant,
    /// Registered wallet, if the winner submitted one in this guild.
    pub wallet: Option<String>,
}

/// Private message to the creator with the full winner list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorNotification {
    pub drop_id: String,
    pub creator_id: String,
    pub project_name: String,
    pub winners: Vec<WinnerRow>,
}

impl Signature for CreatorNotification {}
