use super::in_memory_repository::{
    CREATED_AT_DESC, InMemorySearchableRepository, SearchHooks, name_contains,
};
use domain::{Genre, GenreFilter, SortDirection};

#[derive(Debug, Clone, Copy, Default)]
pub struct GenreSearchHooks;

impl SearchHooks<Genre> for GenreSearchHooks {
    type Filter = GenreFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        &["name", "created_at"]
    }

    /// A genre passes the category criterion when it shares any category
    /// with the filter.
    fn apply_filter(&self, items: Vec<Genre>, filter: &GenreFilter) -> Vec<Genre> {
        let name = filter.name.as_deref().filter(|name| !name.is_empty());
        items
            .into_iter()
            .filter(|genre| name.is_none_or(|name| name_contains(genre.name(), name)))
            .filter(|genre| {
                filter.categories_id.is_empty()
                    || filter
                        .categories_id
                        .iter()
                        .any(|id| genre.categories_id().contains(id))
            })
            .collect()
    }

    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        Some(CREATED_AT_DESC)
    }
}

pub type GenreInMemoryRepository = InMemorySearchableRepository<Genre, GenreSearchHooks>;
