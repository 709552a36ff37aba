// ./api/src/routes/cast_members.rs
use super::ListQuery;
use crate::error::map_application_error_to_response;
use crate::presenter::{CollectionPresenter, DataPresenter};
use crate::state::AppState;
use application::{
    ApplicationError, CastMemberFilterInput, CreateCastMemberInput, UpdateCastMemberInput,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
};
use tracing::{info, warn};

/// `filter_name` and `filter_type` from the query string. The type code must
/// at least be an integer; whether it is a known type is checked downstream.
fn filter_from_query(query: &ListQuery) -> Result<Option<CastMemberFilterInput>, ApplicationError> {
    let cast_member_type = query
        .filter_type
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                ApplicationError::InvalidInput(format!("filter_type must be an integer, got '{raw}'"))
            })
        })
        .transpose()?;
    if query.filter_name.is_none() && cast_member_type.is_none() {
        return Ok(None);
    }
    Ok(Some(CastMemberFilterInput {
        name: query.filter_name.clone(),
        cast_member_type,
    }))
}

pub async fn create_cast_member_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCastMemberInput>,
) -> Response {
    info!(name = %payload.name, "Received request to create cast member");
    match state.cast_member_service.create_cast_member(payload).await {
        Ok(output) => (StatusCode::CREATED, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!("Failed to create cast member via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

/// Handler for listing cast members (GET /cast-members?filter_name=&filter_type=).
pub async fn list_cast_members_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(?query, "Received request to list cast members");
    let filter = match filter_from_query(&query) {
        Ok(filter) => filter,
        Err(e) => {
            warn!("Rejected cast member filter: {}", e);
            return map_application_error_to_response(e);
        }
    };
    match state
        .cast_member_service
        .list_cast_members(query.into_props(filter))
        .await
    {
        Ok(output) => (StatusCode::OK, JsonResponse(CollectionPresenter::from(output))).into_response(),
        Err(e) => {
            warn!("Failed to list cast members via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn get_cast_member_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.cast_member_service.get_cast_member(&id).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(cast_member_id = %id, "Failed to get cast member via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn update_cast_member_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCastMemberInput>,
) -> Response {
    info!(cast_member_id = %id, "Received request to update cast member");
    match state.cast_member_service.update_cast_member(&id, payload).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(cast_member_id = %id, "Failed to update cast member via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn delete_cast_member_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!(cast_member_id = %id, "Received request to delete cast member");
    match state.cast_member_service.delete_cast_member(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(cast_member_id = %id, "Failed to delete cast member via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}
