// ./api/src/routes/categories.rs
use super::ListQuery;
use crate::error::map_application_error_to_response;
use crate::presenter::{CollectionPresenter, DataPresenter};
use crate::state::AppState;
use application::{CreateCategoryInput, UpdateCategoryInput};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as JsonResponse, Response},
};
use tracing::{info, warn};

/// Handler for creating a category (POST /categories).
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryInput>,
) -> Response {
    info!(name = %payload.name, "Received request to create category");
    match state.category_service.create_category(payload).await {
        Ok(output) => (StatusCode::CREATED, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!("Failed to create category via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

/// Handler for listing categories (GET /categories?page=&per_page=&sort=&sort_dir=&filter=).
pub async fn list_categories_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    info!(?query, "Received request to list categories");
    let filter = query.filter.clone();
    match state
        .category_service
        .list_categories(query.into_props(filter))
        .await
    {
        Ok(output) => (StatusCode::OK, JsonResponse(CollectionPresenter::from(output))).into_response(),
        Err(e) => {
            warn!("Failed to list categories via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match state.category_service.get_category(&id).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(category_id = %id, "Failed to get category via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategoryInput>,
) -> Response {
    info!(category_id = %id, "Received request to update category");
    match state.category_service.update_category(&id, payload).await {
        Ok(output) => (StatusCode::OK, JsonResponse(DataPresenter::new(output))).into_response(),
        Err(e) => {
            warn!(category_id = %id, "Failed to update category via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}

pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    info!(category_id = %id, "Received request to delete category");
    match state.category_service.delete_category(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(category_id = %id, "Failed to delete category via handler: {}", e);
            map_application_error_to_response(e)
        }
    }
}
