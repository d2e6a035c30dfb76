//! Wallet registration objects.
//!
//! A registered wallet is what the eligibility gate checks for drops that
//! require one.

use serde::{Deserialize, Serialize};

use crate::signature::Signature;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterWalletRequest {
    pub guild_id: String,
    pub user_id: String,
    pub wallet: String,
}

impl Signature for RegisterWalletRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletCheckRequest {
    pub guild_id: String,
    pub user_id: String,
}

impl Signature for WalletCheckRequest {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletResponse {
    pub guild_id: String,
    pub user_id: String,
    pub wallet: Option<String>,
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_wallet_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}
