//! Lifecycle events.
//!
//! Timers never call into the coordinator directly. They post a
//! [`DropExpired`] on the expiry channel and the
//! [`ExpiryWatcher`](crate::processors::ExpiryWatcher) forwards it, so an
//! armed timer holds no reference back to the drop it belongs to.
//!
//! Events carry identifiers only; the receiver re-reads the registry.

pub mod channels;
pub mod types;

pub use channels::{DEFAULT_CHANNEL_BUFFER, ExpiryReceiver, ExpirySender, expiry_channel};
pub use types::DropExpired;
