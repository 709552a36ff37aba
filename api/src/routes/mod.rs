// ./api/src/routes/mod.rs
use crate::state::AppState;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use domain::{SearchParamsProps, parse_page_number};
use serde::Deserialize;
use tracing::info;

pub mod cast_members;
pub mod categories;
pub mod events;
pub mod genres;

/// Builds the API router for every catalog resource.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/categories",
            get(categories::list_categories_handler).post(categories::create_category_handler),
        )
        .route(
            "/categories/:id",
            get(categories::get_category_handler)
                .patch(categories::update_category_handler)
                .delete(categories::delete_category_handler),
        )
        .route(
            "/cast-members",
            get(cast_members::list_cast_members_handler)
                .post(cast_members::create_cast_member_handler),
        )
        .route(
            "/cast-members/:id",
            get(cast_members::get_cast_member_handler)
                .patch(cast_members::update_cast_member_handler)
                .delete(cast_members::delete_cast_member_handler),
        )
        .route(
            "/genres",
            get(genres::list_genres_handler).post(genres::create_genre_handler),
        )
        .route(
            "/genres/:id",
            get(genres::get_genre_handler)
                .patch(genres::update_genre_handler)
                .delete(genres::delete_genre_handler),
        )
        .route(
            "/events",
            get(events::list_events_handler).post(events::create_event_handler),
        )
        .route(
            "/events/:id",
            get(events::get_event_handler)
                .patch(events::update_event_handler)
                .delete(events::delete_event_handler),
        )
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    info!("Health check endpoint called");
    (StatusCode::OK, "OK")
}

/// List query string. Every value arrives as text so that malformed numbers
/// fall back to defaults instead of rejecting the request.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub sort: Option<String>,
    pub sort_dir: Option<String>,
    pub filter: Option<String>,
    pub filter_name: Option<String>,
    pub filter_type: Option<String>,
    /// Comma-separated category ids.
    pub filter_categories_id: Option<String>,
}

impl ListQuery {
    pub fn into_props<F>(self, filter: Option<F>) -> SearchParamsProps<F> {
        SearchParamsProps {
            page: parse_page_number(self.page.as_deref()),
            per_page: parse_page_number(self.per_page.as_deref()),
            sort: self.sort,
            sort_dir: self.sort_dir,
            filter,
        }
    }
}
