use crate::{ApplicationError, PaginationOutput, SearchableRepository};
use chrono::{DateTime, Utc};
use domain::{Category, CategoryFilter, CategoryId, CategoryProps, SearchParams, SearchParamsProps};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub type CategoryRepository = dyn SearchableRepository<Category, CategoryFilter>;

// --- Request/Response Models ---

#[derive(Deserialize, Debug, Clone)]
pub struct CreateCategoryInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Partial update. `description: Some(None)` clears the description,
/// `None` leaves it untouched.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub type ListCategoriesInput = SearchParamsProps<CategoryFilter>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CategoryOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryOutput {
    fn from(category: &Category) -> Self {
        Self {
            id: category.category_id().to_string(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            is_active: category.is_active(),
            created_at: category.created_at(),
        }
    }
}

/// Distinguishes an explicit `null` from a missing field.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// --- Application Service ---

/// Create/get/update/delete/list use cases for categories.
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<CategoryRepository>) -> Self {
        Self { category_repo }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<CategoryOutput, ApplicationError> {
        info!("Attempting to create category");
        let category = Category::create(CategoryProps {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
            ..Default::default()
        })?;
        self.category_repo.insert(&category).await?;
        info!(category_id = %category.category_id(), "Category created successfully");
        Ok(CategoryOutput::from(&category))
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: &str) -> Result<CategoryOutput, ApplicationError> {
        let category = self.find_category(id).await?;
        Ok(CategoryOutput::from(&category))
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: &str,
        input: UpdateCategoryInput,
    ) -> Result<CategoryOutput, ApplicationError> {
        info!("Attempting to update category");
        let mut category = self.find_category(id).await?;

        if let Some(name) = input.name {
            category.change_name(name)?;
        }
        if let Some(description) = input.description {
            category.change_description(description);
        }
        match input.is_active {
            Some(true) => category.activate(),
            Some(false) => category.deactivate(),
            None => {}
        }

        self.category_repo.update(&category).await?;
        info!(category_id = %category.category_id(), "Category updated successfully");
        Ok(CategoryOutput::from(&category))
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: &str) -> Result<(), ApplicationError> {
        info!("Attempting to delete category");
        let category_id: CategoryId = id.parse()?;
        self.category_repo.delete(&category_id).await?;
        info!(category_id = %category_id, "Category deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, input), fields(page = ?input.page, per_page = ?input.per_page, sort = ?input.sort))]
    pub async fn list_categories(
        &self,
        input: ListCategoriesInput,
    ) -> Result<PaginationOutput<CategoryOutput>, ApplicationError> {
        let params = SearchParams::new(input);
        let result = self.category_repo.search(&params).await?;
        info!(total = result.total, returned = result.items.len(), "Categories listed");
        Ok(PaginationOutput::from_search_result(result, |category| {
            CategoryOutput::from(&category)
        }))
    }

    async fn find_category(&self, id: &str) -> Result<Category, ApplicationError> {
        let category_id: CategoryId = id.parse()?;
        self.category_repo
            .find_by_id(&category_id)
            .await?
            .ok_or_else(|| {
                warn!(category_id = %category_id, "Category not found");
                ApplicationError::not_found::<Category>(&category_id)
            })
    }
}
