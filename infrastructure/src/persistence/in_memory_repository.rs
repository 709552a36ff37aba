// ./infrastructure/src/persistence/in_memory_repository.rs
use application::{ApplicationError, Repository, SearchableRepository};
use async_trait::async_trait;
use domain::{Entity, FieldValue, SearchFilter, SearchParams, SearchResult, SortDirection};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Default ordering shared by every catalog entity: newest first.
pub(crate) const CREATED_AT_DESC: (&str, SortDirection) = ("created_at", SortDirection::Desc);

/// Entity-specific search behavior plugged into [`InMemorySearchableRepository`].
pub trait SearchHooks<E: Entity>: Send + Sync + 'static {
    type Filter: SearchFilter + Send + Sync + 'static;

    /// Field names that an explicit `sort` may name.
    fn sortable_fields(&self) -> &[&'static str];

    /// Keeps the items matching `filter`, preserving their relative order.
    /// Only called when a filter is present.
    fn apply_filter(&self, items: Vec<E>, filter: &Self::Filter) -> Vec<E>;

    /// Ordering used when no usable `sort` was requested.
    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        None
    }
}

/// Case-insensitive substring match used by the name filters.
pub(crate) fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.to_lowercase())
}

/// Ordered in-memory collection answering filter -> sort -> paginate queries.
///
/// Items live in a plain `Vec` in insertion order. Lookups scan it and
/// compare identities with the id's `PartialEq`, so an id parsed back from
/// its string form finds the stored entity.
#[derive(Debug, Clone)]
pub struct InMemorySearchableRepository<E, H> {
    items: Arc<RwLock<Vec<E>>>,
    hooks: H,
}

impl<E, H: Default> Default for InMemorySearchableRepository<E, H> {
    fn default() -> Self {
        Self::new(H::default())
    }
}

impl<E, H> InMemorySearchableRepository<E, H> {
    pub fn new(hooks: H) -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            hooks,
        }
    }

    /// Builds a repository pre-filled with `items`, kept in the given order.
    pub fn with_items(hooks: H, items: Vec<E>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            hooks,
        }
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

impl<E, H> InMemorySearchableRepository<E, H>
where
    E: Entity,
    H: SearchHooks<E>,
{
    fn apply_sort(
        &self,
        mut items: Vec<E>,
        sort: Option<&str>,
        sort_dir: Option<SortDirection>,
    ) -> Vec<E> {
        let requested = sort
            .filter(|field| self.hooks.sortable_fields().iter().any(|f| f == field))
            .map(|field| (field, sort_dir.unwrap_or_default()));
        if requested.is_none() && sort.is_some() {
            debug!(kind = E::KIND, sort = ?sort, "Sort field not sortable, using default order");
        }

        let Some((field, direction)) = requested.or_else(|| self.hooks.default_sort()) else {
            return items;
        };

        // `sort_by` is stable: ties keep their filtered order
        items.sort_by(|a, b| {
            let ordering = FieldValue::compare_options(
                a.field_value(field).as_ref(),
                b.field_value(field).as_ref(),
            );
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        items
    }
}

#[async_trait]
impl<E, H> Repository<E> for InMemorySearchableRepository<E, H>
where
    E: Entity,
    H: SearchHooks<E>,
{
    #[instrument(skip(self, entity), fields(kind = E::KIND, id = %entity.entity_id()))]
    async fn insert(&self, entity: &E) -> Result<(), ApplicationError> {
        debug!("Inserting entity into in-memory store");
        self.items.write().await.push(entity.clone());
        Ok(())
    }

    /// Appends the whole batch under a single write lock.
    #[instrument(skip(self, entities), fields(kind = E::KIND, count = entities.len()))]
    async fn bulk_insert(&self, entities: &[E]) -> Result<(), ApplicationError> {
        debug!("Inserting batch directly into in-memory store");
        self.items.write().await.extend_from_slice(entities);
        Ok(())
    }

    #[instrument(skip(self, entity), fields(kind = E::KIND, id = %entity.entity_id()))]
    async fn update(&self, entity: &E) -> Result<(), ApplicationError> {
        debug!("Updating entity in in-memory store");
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|item| item.entity_id() == entity.entity_id())
            .ok_or_else(|| ApplicationError::not_found::<E>(entity.entity_id()))?;
        *slot = entity.clone();
        Ok(())
    }

    #[instrument(skip(self, id), fields(kind = E::KIND, id = %id))]
    async fn delete(&self, id: &E::Id) -> Result<(), ApplicationError> {
        debug!("Deleting entity from in-memory store");
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.entity_id() == id)
            .ok_or_else(|| ApplicationError::not_found::<E>(id))?;
        items.remove(index);
        Ok(())
    }

    #[instrument(skip(self, id), fields(kind = E::KIND, id = %id))]
    async fn find_by_id(&self, id: &E::Id) -> Result<Option<E>, ApplicationError> {
        debug!("Getting entity from in-memory store");
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.entity_id() == id).cloned())
    }

    #[instrument(skip(self), fields(kind = E::KIND))]
    async fn find_all(&self) -> Result<Vec<E>, ApplicationError> {
        debug!("Listing all entities from in-memory store");
        Ok(self.items.read().await.clone())
    }

    #[instrument(skip(self, ids), fields(kind = E::KIND, requested = ids.len()))]
    async fn find_by_ids(&self, ids: &[E::Id]) -> Result<Vec<E>, ApplicationError> {
        let items = self.items.read().await;
        let found: Vec<E> = items
            .iter()
            .filter(|item| ids.contains(item.entity_id()))
            .cloned()
            .collect();
        debug!(found = found.len(), "Looked up entities by id");
        Ok(found)
    }
}

#[async_trait]
impl<E, H> SearchableRepository<E, H::Filter> for InMemorySearchableRepository<E, H>
where
    E: Entity,
    H: SearchHooks<E>,
{
    fn sortable_fields(&self) -> &[&'static str] {
        self.hooks.sortable_fields()
    }

    #[instrument(
        skip(self, params),
        fields(kind = E::KIND, page = params.page(), per_page = params.per_page(), sort = ?params.sort())
    )]
    async fn search(
        &self,
        params: &SearchParams<H::Filter>,
    ) -> Result<SearchResult<E>, ApplicationError> {
        let items = self.items.read().await.clone();

        let filtered = match params.filter() {
            Some(filter) => self.hooks.apply_filter(items, filter),
            None => items,
        };
        let sorted = self.apply_sort(filtered, params.sort(), params.sort_dir());

        let total = sorted.len();
        let page_items: Vec<E> = sorted
            .into_iter()
            .skip(params.offset())
            .take(params.limit())
            .collect();
        debug!(total, returned = page_items.len(), "Search completed");

        Ok(SearchResult::new(
            page_items,
            total,
            params.page(),
            params.per_page(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Category, CategoryId, CategoryProps, SearchParamsProps};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Name filter that records how often it runs.
    #[derive(Debug, Default)]
    struct CountingHooks {
        filter_calls: Arc<AtomicUsize>,
    }

    impl SearchHooks<Category> for CountingHooks {
        type Filter = String;

        fn sortable_fields(&self) -> &[&'static str] {
            &["name"]
        }

        fn apply_filter(&self, items: Vec<Category>, filter: &String) -> Vec<Category> {
            self.filter_calls.fetch_add(1, Ordering::SeqCst);
            items
                .into_iter()
                .filter(|item| name_contains(item.name(), filter))
                .collect()
        }
    }

    fn category(name: &str) -> Category {
        Category::new(CategoryProps {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn names(items: &[Category]) -> Vec<&str> {
        items.iter().map(Category::name).collect()
    }

    fn params(
        page: i64,
        per_page: i64,
        filter: Option<&str>,
    ) -> SearchParams<String> {
        SearchParams::new(SearchParamsProps {
            page: Some(page),
            per_page: Some(per_page),
            filter: filter.map(str::to_string),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn search_without_filter_never_calls_filter_hook() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let calls = repo.hooks().filter_calls.clone();
        repo.bulk_insert(&[category("a"), category("b")]).await.unwrap();

        let result = repo.search(&SearchParams::<String>::default()).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(names(&result.items), vec!["a", "b"]);

        // An empty string is no filter at all
        let result = repo.search(&params(1, 15, Some(""))).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        repo.search(&params(1, 15, Some("a"))).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pagination_windows() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let items: Vec<Category> = ["a1", "a2", "a3", "a4", "a5", "b"]
            .into_iter()
            .map(category)
            .collect();
        repo.bulk_insert(&items).await.unwrap();

        let expected: [&[&str]; 4] = [&["a1", "a2"], &["a3", "a4"], &["a5"], &[]];
        for (page, expected) in (1..=4).zip(expected) {
            let result = repo.search(&params(page, 2, Some("a"))).await.unwrap();
            assert_eq!(names(&result.items), expected, "page {page}");
            assert_eq!(result.total, 5);
            assert_eq!(result.current_page, page as u64);
            assert_eq!(result.per_page, 2);
            assert_eq!(result.last_page, 3);
        }
    }

    #[tokio::test]
    async fn empty_collection_has_one_page() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let result = repo.search(&SearchParams::<String>::default()).await.unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.last_page, 1);
    }

    #[tokio::test]
    async fn update_and_delete_missing_entity_fail_with_not_found() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let missing = category("ghost");
        let missing_id = *missing.category_id();

        let expected_id = missing_id.to_string();
        let err = repo.update(&missing).await.unwrap_err();
        assert!(
            matches!(err, ApplicationError::NotFound { id, entity: "Category" } if id == expected_id)
        );
        let err = repo.delete(&missing_id).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));

        assert_eq!(repo.find_by_id(&missing_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lookups_compare_ids_by_value() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let stored = category("Movie");
        repo.insert(&stored).await.unwrap();

        let parsed: CategoryId = stored.category_id().to_string().parse().unwrap();
        assert_eq!(repo.find_by_id(&parsed).await.unwrap(), Some(stored.clone()));

        let found = repo.find_by_ids(&[parsed, CategoryId::new()]).await.unwrap();
        assert_eq!(found, vec![stored]);
    }

    #[tokio::test]
    async fn update_replaces_in_place() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        let first = category("first");
        let mut second = category("second");
        repo.bulk_insert(&[first.clone(), second.clone(), category("third")])
            .await
            .unwrap();

        second.change_name("renamed").unwrap();
        repo.update(&second).await.unwrap();
        assert_eq!(
            names(&repo.find_all().await.unwrap()),
            vec!["first", "renamed", "third"]
        );

        repo.delete(first.category_id()).await.unwrap();
        assert_eq!(names(&repo.find_all().await.unwrap()), vec!["renamed", "third"]);
    }

    #[tokio::test]
    async fn find_all_returns_a_detached_copy() {
        let repo = InMemorySearchableRepository::with_items(
            CountingHooks::default(),
            vec![category("a"), category("b")],
        );

        let first = repo.find_all().await.unwrap();
        let mut second = repo.find_all().await.unwrap();
        assert_eq!(first, second);

        second.clear();
        second.push(category("intruder"));
        assert_eq!(repo.find_all().await.unwrap(), first);
    }

    #[tokio::test]
    async fn bulk_insert_preserves_order() {
        let repo = InMemorySearchableRepository::new(CountingHooks::default());
        repo.insert(&category("x")).await.unwrap();
        repo.bulk_insert(&[category("c"), category("a"), category("b")])
            .await
            .unwrap();
        assert_eq!(names(&repo.find_all().await.unwrap()), vec!["x", "c", "a", "b"]);
    }

    #[tokio::test]
    async fn without_default_sort_unsorted_requests_keep_insertion_order() {
        let repo = InMemorySearchableRepository::with_items(
            CountingHooks::default(),
            vec![category("b"), category("c"), category("a")],
        );
        let result = repo
            .search(&SearchParams::new(SearchParamsProps {
                sort: Some("description".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(names(&result.items), vec!["b", "c", "a"]);

        let result = repo
            .search(&SearchParams::new(SearchParamsProps {
                sort: Some("name".to_string()),
                sort_dir: Some("desc".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();
        assert_eq!(names(&result.items), vec!["c", "b", "a"]);
    }
}
