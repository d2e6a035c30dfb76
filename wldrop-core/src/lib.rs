#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! Drop lifecycle coordination: collecting entries, resolving winners
//! exactly once, and resuming persisted drops after a restart.

pub mod collaborators;
pub mod config;
pub mod drops;
pub mod entities;
pub mod events;
pub mod framework;
pub mod processors;
pub mod utils;
