pub mod cast_member_repository;
pub mod category_repository;
pub mod event_repository;
pub mod genre_repository;
pub mod in_memory_repository;

// Re-export the generic store and the per-entity repositories
pub use cast_member_repository::{CastMemberInMemoryRepository, CastMemberSearchHooks};
pub use category_repository::{CategoryInMemoryRepository, CategorySearchHooks};
pub use event_repository::{EventInMemoryRepository, EventSearchHooks};
pub use genre_repository::{GenreInMemoryRepository, GenreSearchHooks};
pub use in_memory_repository::{InMemorySearchableRepository, SearchHooks};
