// Module declarations
pub mod persistence;

// Re-export all implementations
pub use persistence::{
    CastMemberInMemoryRepository, CastMemberSearchHooks, CategoryInMemoryRepository,
    CategorySearchHooks, EventInMemoryRepository, EventSearchHooks, GenreInMemoryRepository,
    GenreSearchHooks, InMemorySearchableRepository, SearchHooks,
};
