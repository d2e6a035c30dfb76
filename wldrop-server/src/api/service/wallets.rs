use axum::{Json, extract::State, response::IntoResponse};
use wldrop_core::drops::{GuildId, UserId};
use wldrop_sdk::objects::{
    RegisterWalletRequest, WalletCheckRequest, WalletResponse, is_valid_wallet_address,
};

use super::ServiceApiError;
use crate::api::extractors::SignedBody;
use crate::state::AppState;

/// `POST /wallets`: register or replace a member's wallet.
pub(super) async fn register_wallet(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<RegisterWalletRequest>,
) -> Result<impl IntoResponse, ServiceApiError> {
    let wallet = request.wallet.trim();
    if !is_valid_wallet_address(wallet) {
        return Err(ServiceApiError::InvalidWallet);
    }

    let row = state
        .wallets
        .register(
            &GuildId::from(request.guild_id),
            &UserId::from(request.user_id),
            wallet,
        )
        .await?;

    Ok(Json(WalletResponse {
        guild_id: row.guild_id,
        user_id: row.user_id,
        wallet: Some(row.wallet),
    }))
}

/// `POST /wallets/check`
pub(super) async fn check_wallet(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<WalletCheckRequest>,
) -> Result<impl IntoResponse, ServiceApiError> {
    let wallet = state
        .wallets
        .wallet_for(
            &GuildId::from(request.guild_id.as_str()),
            &UserId::from(request.user_id.as_str()),
        )
        .await?;

    Ok(Json(WalletResponse {
        guild_id: request.guild_id,
        user_id: request.user_id,
        wallet,
    }))
}
