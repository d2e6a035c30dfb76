use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use wldrop_core::drops::{DropId, UserId};
use wldrop_core::processors::EntrySignal;
use wldrop_sdk::objects::{CancelRequest, SignalRequest, SignalResponse};

use crate::api::extractors::SignedBody;
use crate::state::AppState;

/// `POST /signals`: a reaction was placed or withdrawn.
///
/// Always accepted; what happened is reported in the outcome.
pub(super) async fn signal(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<SignalRequest>,
) -> impl IntoResponse {
    let outcome = state
        .coordinator
        .on_external_signal(EntrySignal::from(request))
        .await;
    (StatusCode::ACCEPTED, Json(SignalResponse { outcome }))
}

/// `POST /drops/cancel`: explicit cancel command.
pub(super) async fn cancel_drop(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<CancelRequest>,
) -> impl IntoResponse {
    let outcome = state
        .coordinator
        .on_creator_cancel(
            &DropId::from(request.announcement_id),
            &UserId::from(request.requester_id),
        )
        .await;
    Json(SignalResponse { outcome })
}
