//! Lifecycle processors.
//!
//! - `CompletionCoordinator`: creation, signals, completion and cancellation
//! - `ResumeManager`: rebuilds active drops from the store at startup
//! - `ExpiryWatcher`: receives `DropExpired`, asks the coordinator to complete

pub mod coordinator;
pub mod expiry_watcher;
pub mod resume;

pub use coordinator::{
    CANCEL_SIGNAL_KIND, Collaborators, CompletionCoordinator, DEFAULT_SIGNAL_KIND, DropError,
    DropSnapshot, EntrySignal, NewDrop, validate_new_drop,
};
pub use expiry_watcher::ExpiryWatcher;
pub use resume::{ResumeManager, ResumeReport};
