use super::in_memory_repository::{
    CREATED_AT_DESC, InMemorySearchableRepository, SearchHooks, name_contains,
};
use domain::{Category, CategoryFilter, SortDirection};

#[derive(Debug, Clone, Copy, Default)]
pub struct CategorySearchHooks;

impl SearchHooks<Category> for CategorySearchHooks {
    type Filter = CategoryFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        &["name", "created_at"]
    }

    fn apply_filter(&self, items: Vec<Category>, filter: &CategoryFilter) -> Vec<Category> {
        items
            .into_iter()
            .filter(|category| name_contains(category.name(), filter))
            .collect()
    }

    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        Some(CREATED_AT_DESC)
    }
}

pub type CategoryInMemoryRepository = InMemorySearchableRepository<Category, CategorySearchHooks>;
