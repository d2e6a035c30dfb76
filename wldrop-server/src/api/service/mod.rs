//! Service API handlers.
//!
//! Called by the command layer (the bot front end). Every body is signed
//! and verified via the `Wldrop-Signature` header.
//!
//! # Endpoints
//!
//! - `POST /drops`         – open a drop
//! - `POST /drops/status`  – state of a drop
//! - `POST /drops/cancel`  – creator cancel
//! - `POST /signals`       – reaction added or removed
//! - `POST /wallets`       – register a member wallet
//! - `POST /wallets/check` – look up a member wallet

use axum::{Router, http::StatusCode, response::IntoResponse, routing::post};
use wldrop_core::collaborators::StoreError;
use wldrop_core::processors::{DropError, DropSnapshot};
use wldrop_sdk::objects::DropResponse;

use crate::state::AppState;

mod drops;
mod signals;
mod wallets;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/drops", post(drops::create_drop))
        .route("/drops/status", post(drops::drop_status))
        .route("/drops/cancel", post(signals::cancel_drop))
        .route("/signals", post(signals::signal))
        .route("/wallets", post(wallets::register_wallet))
        .route("/wallets/check", post(wallets::check_wallet))
}

fn to_response(snapshot: &DropSnapshot) -> DropResponse {
    let settings = &snapshot.settings;
    DropResponse {
        drop_id: settings.id.to_string(),
        kind: settings.kind.into(),
        status: snapshot.phase.into(),
        winner_count: settings.winner_count,
        max_entries: settings.max_entries,
        entry_count: u32::try_from(snapshot.entry_count).unwrap_or(u32::MAX),
        deadline: settings.deadline.unix_timestamp(),
        winners: snapshot.winners.iter().cloned().map(Into::into).collect(),
    }
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum ServiceApiError {
    Drop(DropError),
    Store(StoreError),
    NotFound,
    InvalidWallet,
}

impl From<DropError> for ServiceApiError {
    fn from(value: DropError) -> Self {
        Self::Drop(value)
    }
}

impl From<StoreError> for ServiceApiError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl IntoResponse for ServiceApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServiceApiError::Drop(DropError::Validation(message)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, message).into_response()
            }
            ServiceApiError::Drop(DropError::Transport(e)) => {
                tracing::warn!(error = %e, "Gateway failure while handling request");
                (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
            }
            ServiceApiError::Drop(DropError::AlreadyRegistered(id)) => {
                (StatusCode::CONFLICT, format!("drop {id} already exists")).into_response()
            }
            ServiceApiError::Drop(DropError::Store(e)) | ServiceApiError::Store(e) => {
                tracing::error!(error = %e, "Service API store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ServiceApiError::NotFound => (StatusCode::NOT_FOUND, "drop not found").into_response(),
            ServiceApiError::InvalidWallet => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "wallet must be 0x followed by 40 hex digits",
            )
                .into_response(),
        }
    }
}
