//! Drop creation and status objects.

use serde::{Deserialize, Serialize};

use crate::signature::Signature;

/// How winners are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    /// The first `winner_count` valid entrants win.
    Fcfs,
    /// A uniform random sample is drawn at the cap or the deadline.
    Raffle,
}

impl std::fmt::Display for DropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropKind::Fcfs => write!(f, "FCFS"),
            DropKind::Raffle => write!(f, "raffle"),
        }
    }
}

/// A chat user as seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub label: String,
}

/// Request payload for opening a new drop.
///
/// Sent by the command layer once the creator has issued the command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDropRequest {
    pub kind: DropKind,
    pub winner_count: u32,
    /// `0` means unbounded. Ignored for FCFS drops.
    #[serde(default)]
    pub max_entries: u32,
    /// Falls back to the server's default duration when absent.
    #[serde(default)]
    pub duration_secs: Option<u64>,
    #[serde(default)]
    pub require_gate: bool,
    pub creator_id: String,
    pub channel_id: String,
    pub guild_id: String,
    pub project_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discord_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// The entry signal kind (a reaction emoji). Defaults to 🎉.
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Signature for CreateDropRequest {}

/// Request payload for looking up an active drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetDropRequest {
    pub drop_id: String,
}

impl Signature for GetDropRequest {}

/// Lifecycle phase of a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropStatus {
    Collecting,
    Completing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for DropStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropStatus::Collecting => write!(f, "collecting"),
            DropStatus::Completing => write!(f, "completing"),
            DropStatus::Completed => write!(f, "completed"),
            DropStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Response returned by the "create drop" and "drop status" endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropResponse {
    /// The announcement id, which is also the drop id.
    pub drop_id: String,
    pub kind: DropKind,
    pub status: DropStatus,
    pub winner_count: u32,
    pub max_entries: u32,
    pub entry_count: u32,
    /// Unix timestamp of the deadline.
    pub deadline: i64,
    pub winners: Vec<Participant>,
}
