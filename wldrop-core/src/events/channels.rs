//! Event channel factories and handles.

use super::types::DropExpired;
use tokio::sync::mpsc;

/// Default buffer size for event channels.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for DropExpired events.
pub type ExpirySender = mpsc::Sender<DropExpired>;
/// Receiver handle for DropExpired events.
pub type ExpiryReceiver = mpsc::Receiver<DropExpired>;

/// Create a new DropExpired channel.
///
/// Every armed timer holds a clone of the sender.
pub fn expiry_channel() -> (ExpirySender, ExpiryReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
