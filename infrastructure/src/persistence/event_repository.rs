use super::in_memory_repository::{
    CREATED_AT_DESC, InMemorySearchableRepository, SearchHooks, name_contains,
};
use domain::{Event, EventFilter, SortDirection};

#[derive(Debug, Clone, Copy, Default)]
pub struct EventSearchHooks;

impl SearchHooks<Event> for EventSearchHooks {
    type Filter = EventFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        &["name", "created_at"]
    }

    fn apply_filter(&self, items: Vec<Event>, filter: &EventFilter) -> Vec<Event> {
        items
            .into_iter()
            .filter(|event| name_contains(event.name(), filter))
            .collect()
    }

    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        Some(CREATED_AT_DESC)
    }
}

pub type EventInMemoryRepository = InMemorySearchableRepository<Event, EventSearchHooks>;
