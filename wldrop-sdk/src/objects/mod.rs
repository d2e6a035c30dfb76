//! Wire objects.
//!
//! These are the API/DTO versions of the domain types. The core crate keeps
//! its own copies (with `sqlx` support and strong id types) and converts.

pub mod drops;
pub mod gateway;
pub mod signals;
pub mod wallets;

pub use drops::{CreateDropRequest, DropKind, DropResponse, DropStatus, GetDropRequest, Participant};
pub use signals::{CancelRequest, SignalAction, SignalOutcome, SignalRequest, SignalResponse};
pub use wallets::{RegisterWalletRequest, WalletCheckRequest, WalletResponse, is_valid_wallet_address};
