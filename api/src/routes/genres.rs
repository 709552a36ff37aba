// ./api/src/routes/genres.rs
use super::ListQuery;
use crate::error::map_application_error_to_response;
use crate::presenter::{CollectionPresenter, DataPresenter};
use crate::state::AppState;
use application::{CreateGenreInput, GenreFilterInput, UpdateGenreInput};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
};
use tracing::{info, warn};

fn filter_from_query(query: &ListQuery) -> Option<GenreFilterInput> {
    let categories_id: Vec<String> = query
        .filter_categories_id
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if query.filter_name.is_none() && categories_id.is_empty() {
        return None;
    }
    Some(GenreFilterInput {
        name: query.filter_name.clone(),
        categories_id,
    })
}

pub async fn create_genre_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateGenreInput>,
) -> Response {
    info!(name = %payload.name, "Received request to create genre");
    match state.genre_service.create_genre(payload).await {
        Ok(output) => (StatusCode::CREATED, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!("Failed to create genre via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

/// Handler for listing genres (GET /genres?filter_name=&filter_categories_id=a,b).
pub async fn list_genres_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(?query, "Received request to list genres");
    let filter = filter_from_query(&query);
    match state.genre_service.list_genres(query.into_props(filter)).await {
        Ok(output) => (StatusCode::OK, JsonResponse(CollectionPresenter::from(output))).into_response(),
        Err(e) => {
            warn!("Failed to list genres via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn get_genre_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.genre_service.get_genre(&id).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(genre_id = %id, "Failed to get genre via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn update_genre_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateGenreInput>,
) -> Response {
    info!(genre_id = %id, "Received request to update genre");
    match state.genre_service.update_genre(&id, payload).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(genre_id = %id, "Failed to update genre via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn delete_genre_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!(genre_id = %id, "Received request to delete genre");
    match state.genre_service.delete_genre(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(genre_id = %id, "Failed to delete genre via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}
