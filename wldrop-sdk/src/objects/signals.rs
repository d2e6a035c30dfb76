//! Entry and cancel signal objects.

use serde::{Deserialize, Serialize};

use super::drops::Participant;
use crate::signature::Signature;

/// Whether the participant placed or withdrew the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalAction {
    Added,
    Removed,
}

/// A reaction event forwarded by the command layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRequest {
    pub announcement_id: String,
    pub participant: Participant,
    pub signal_kind: String,
    pub action: SignalAction,
    #[serde(default)]
    pub is_bot: bool,
}

impl Signature for SignalRequest {}

/// An explicit cancel command issued against an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub announcement_id: String,
    pub requester_id: String,
}

impl Signature for CancelRequest {}

/// What the coordinator did with a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOutcome {
    Accepted,
    /// Accepted, and the entry filled the drop.
    Completed,
    Removed,
    Duplicate,
    AtCapacity,
    AlreadyCompleted,
    GateRejected,
    GateUnavailable,
    Banned,
    Cancelled,
    NotCreator,
    UnknownDrop,
    Ignored,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResponse {
    pub outcome: SignalOutcome,
}
