//! In-memory drop model: entries, winner selection, timers and the
//! registry of active drops.

pub mod entry_set;
pub mod ids;
pub mod participant;
pub mod registry;
pub mod selector;
pub mod state;
pub mod timer;

pub use entry_set::{EntryRejection, EntrySet};
pub use ids::{ChannelId, DropId, GuildId, UserId};
pub use participant::Participant;
pub use registry::{DropRegistry, RegistryError};
pub use selector::select_winners;
pub use state::{DropConfig, DropDetails, DropHandle, DropSettings, DropState, Phase};
pub use timer::{ExpiryTimer, TimerHandle};
