// ./api/src/routes/events.rs
use super::ListQuery;
use crate::error::map_application_error_to_response;
use crate::presenter::{CollectionPresenter, DataPresenter};
use crate::state::AppState;
use application::{CreateEventInput, UpdateEventInput};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
};
use tracing::{info, warn};

pub async fn create_event_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventInput>,
) -> Response {
    info!(name = %payload.name, "Received request to create event");
    match state.event_service.create_event(payload).await {
        Ok(output) => (StatusCode::CREATED, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!("Failed to create event via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn list_events_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(?query, "Received request to list events");
    let filter = query.filter.clone();
    match state.event_service.list_events(query.into_props(filter)).await {
        Ok(output) => (StatusCode::OK, JsonResponse(CollectionPresenter::from(output))).into_response(),
        Err(e) => {
            warn!("Failed to list events via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn get_event_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.event_service.get_event(&id).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(event_id = %id, "Failed to get event via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn update_event_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventInput>,
) -> Response {
    info!(event_id = %id, "Received request to update event");
    match state.event_service.update_event(&id, payload).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(event_id = %id, "Failed to update event via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn delete_event_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!(event_id = %id, "Received request to delete event");
    match state.event_service.delete_event(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(event_id = %id, "Failed to delete event via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}
