use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use wldrop_core::drops::{DropId, Phase};
use wldrop_core::processors::{DropSnapshot, NewDrop};
use wldrop_sdk::objects::{CreateDropRequest, GetDropRequest};

use super::{ServiceApiError, to_response};
use crate::api::extractors::SignedBody;
use crate::state::AppState;

/// `POST /drops`: announce a drop and start collecting.
pub(super) async fn create_drop(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<CreateDropRequest>,
) -> Result<impl IntoResponse, ServiceApiError> {
    let settings = state
        .coordinator
        .create_drop(NewDrop::from(request))
        .await?;

    let snapshot = DropSnapshot {
        settings,
        phase: Phase::Collecting,
        entry_count: 0,
        winners: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(to_response(&snapshot))))
}

/// `POST /drops/status`
pub(super) async fn drop_status(
    State(state): State<AppState>,
    SignedBody(request): SignedBody<GetDropRequest>,
) -> Result<impl IntoResponse, ServiceApiError> {
    let snapshot = state
        .coordinator
        .drop_status(&DropId::from(request.drop_id))
        .await?
        .ok_or(ServiceApiError::NotFound)?;
    Ok(Json(to_response(&snapshot)))
}
