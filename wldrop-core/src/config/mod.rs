//! Runtime drop policy.
//!
//! The server parses its TOML file into these types; the coordinator reads
//! them through a [`ConfigStore`] so a reload takes effect for the next
//! creation or signal without a restart.

mod config_store;
mod policy;

pub use config_store::ConfigStore;
pub use policy::DropPolicy;
