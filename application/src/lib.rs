use async_trait::async_trait;
use domain::{DomainError, Entity, SearchParams, SearchResult};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

pub mod cast_member;
pub mod category;
pub mod event;
pub mod genre;

pub use cast_member::{
    CastMemberFilterInput, CastMemberOutput, CastMemberRepository, CastMemberService,
    CreateCastMemberInput, ListCastMembersInput, UpdateCastMemberInput,
};
pub use category::{
    CategoryOutput, CategoryRepository, CategoryService, CreateCategoryInput,
    ListCategoriesInput, UpdateCategoryInput,
};
pub use event::{
    CreateEventInput, EventOutput, EventRepository, EventService, ListEventsInput,
    UpdateEventInput,
};
pub use genre::{
    CreateGenreInput, GenreCategoryOutput, GenreFilterInput, GenreOutput, GenreRepository,
    GenreService, ListGenresInput, UpdateGenreInput,
};

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{entity} Not Found using ID {id}")]
    NotFound { id: String, entity: &'static str },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Domain validation error: {0}")]
    DomainError(#[from] DomainError), // Propagate domain errors cleanly
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

impl ApplicationError {
    pub fn not_found<E: Entity>(id: &E::Id) -> Self {
        ApplicationError::NotFound {
            id: id.to_string(),
            entity: E::KIND,
        }
    }

    /// A single not-found error naming every missing id.
    pub fn not_found_many<E: Entity>(ids: &[E::Id]) -> Self {
        let id = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        ApplicationError::NotFound { id, entity: E::KIND }
    }
}

// --- Infrastructure Interfaces (Traits) ---

/// Storage of one aggregate type, keyed by the aggregate's identity.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Appends an entity. Uniqueness is the caller's concern.
    async fn insert(&self, entity: &E) -> Result<(), ApplicationError>;
    /// Replaces the stored entity with the same identity.
    /// Fails with `NotFound` when there is none.
    async fn update(&self, entity: &E) -> Result<(), ApplicationError>;
    /// Removes the entity with the given identity.
    /// Fails with `NotFound` when there is none.
    async fn delete(&self, id: &E::Id) -> Result<(), ApplicationError>;
    /// Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, ApplicationError>;
    /// Owned copy of every stored entity.
    async fn find_all(&self) -> Result<Vec<E>, ApplicationError>;
    /// Entities whose identity is in `ids`, in storage order.
    async fn find_by_ids(&self, ids: &[E::Id]) -> Result<Vec<E>, ApplicationError>;
    /// Appends all entities preserving their order.
    #[instrument(skip(self, entities))]
    async fn bulk_insert(&self, entities: &[E]) -> Result<(), ApplicationError> {
        debug!(entity = E::KIND, count = entities.len(), "Inserting batch via default iteration");
        for entity in entities {
            self.insert(entity).await?;
        }
        Ok(())
    }
}

/// A repository that can answer filtered, sorted and paginated queries.
#[async_trait]
pub trait SearchableRepository<E: Entity, F: Send + Sync + 'static>: Repository<E> {
    /// Field names accepted as `sort`.
    fn sortable_fields(&self) -> &[&'static str];
    async fn search(&self, params: &SearchParams<F>) -> Result<SearchResult<E>, ApplicationError>;
}

// --- Shared Response Models ---

/// Paginated list returned by every `list_*` use case.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaginationOutput<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub current_page: u64,
    pub last_page: u64,
    pub per_page: u64,
}

impl<T> PaginationOutput<T> {
    pub fn from_search_result<E>(result: SearchResult<E>, mapper: impl FnMut(E) -> T) -> Self {
        let result = result.map_items(mapper);
        Self {
            items: result.items,
            total: result.total,
            current_page: result.current_page,
            last_page: result.last_page,
            per_page: result.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Category, CategoryId, CategoryProps};
    use serde_json::json;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let id = CategoryId::new();
        let err = ApplicationError::not_found::<Category>(&id);
        assert_eq!(err.to_string(), format!("Category Not Found using ID {id}"));
    }

    #[test]
    fn not_found_many_joins_ids() {
        let first = CategoryId::new();
        let second = CategoryId::new();
        let err = ApplicationError::not_found_many::<Category>(&[first, second]);
        assert!(
            matches!(err, ApplicationError::NotFound { id, entity: "Category" } if id == format!("{first}, {second}"))
        );
    }

    #[test]
    fn pagination_output_from_empty_result() {
        let result: SearchResult<Category> = SearchResult::new(vec![], 1, 1, 2);
        let output = PaginationOutput::from_search_result(result, |c| c.name().to_string());
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({ "items": [], "total": 1, "current_page": 1, "last_page": 1, "per_page": 2 })
        );
    }

    #[test]
    fn pagination_output_maps_items() {
        let category = Category::new(CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        });
        let result = SearchResult::new(vec![category], 1, 1, 2);
        let output = PaginationOutput::from_search_result(result, |c| c.name().to_string());
        assert_eq!(output.items, vec!["Movie".to_string()]);
        assert_eq!(output.last_page, 1);
    }
}
