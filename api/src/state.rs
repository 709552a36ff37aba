// ./api/src/state.rs
use application::{CastMemberService, CategoryService, EventService, GenreService};
use infrastructure::{
    CastMemberInMemoryRepository, CategoryInMemoryRepository, EventInMemoryRepository,
    GenreInMemoryRepository,
};
use std::sync::Arc;
use tracing::info;

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<CategoryService>,
    pub cast_member_service: Arc<CastMemberService>,
    pub genre_service: Arc<GenreService>,
    pub event_service: Arc<EventService>,
}

impl AppState {
    /// Wires every service to the in-memory repositories.
    pub fn in_memory() -> Self {
        // 1. Create infrastructure components
        let category_repository = Arc::new(CategoryInMemoryRepository::default());
        let cast_member_repository = Arc::new(CastMemberInMemoryRepository::default());
        let genre_repository = Arc::new(GenreInMemoryRepository::default());
        let event_repository = Arc::new(EventInMemoryRepository::default());
        info!("In-memory infrastructure components initialized.");

        // 2. Create application services, injecting dependencies
        let state = Self {
            category_service: Arc::new(CategoryService::new(category_repository.clone())),
            cast_member_service: Arc::new(CastMemberService::new(cast_member_repository)),
            // Genres check their categories against the same store
            genre_service: Arc::new(GenreService::new(genre_repository, category_repository)),
            event_service: Arc::new(EventService::new(event_repository)),
        };
        info!("Application services initialized.");
        state
    }
}
