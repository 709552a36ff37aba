use crate::{ApplicationError, PaginationOutput, Repository, SearchableRepository};
use chrono::{DateTime, Utc};
use domain::{
    Category, CategoryId, DomainError, Genre, GenreFilter, GenreId, GenreProps, SearchParams,
    SearchParamsProps,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub type GenreRepository = dyn SearchableRepository<Genre, GenreFilter>;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateGenreInput {
    pub name: String,
    pub categories_id: Vec<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateGenreInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories_id: Option<Vec<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GenreFilterInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub categories_id: Vec<String>,
}

impl GenreFilterInput {
    fn into_filter(self) -> Result<GenreFilter, DomainError> {
        Ok(GenreFilter {
            name: self.name,
            categories_id: parse_category_ids(&self.categories_id)?,
        })
    }
}

pub type ListGenresInput = SearchParamsProps<GenreFilterInput>;

/// Category summary embedded in a genre.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenreCategoryOutput {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenreOutput {
    pub id: String,
    pub name: String,
    pub categories: Vec<GenreCategoryOutput>,
    pub categories_id: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl GenreOutput {
    /// `categories` holds whatever related categories are known; ids without
    /// a match are still listed in `categories_id`.
    fn build(genre: &Genre, categories: &HashMap<CategoryId, Category>) -> Self {
        Self {
            id: genre.genre_id().to_string(),
            name: genre.name().to_string(),
            categories: genre
                .categories_id()
                .iter()
                .filter_map(|id| categories.get(id))
                .map(|category| GenreCategoryOutput {
                    id: category.category_id().to_string(),
                    name: category.name().to_string(),
                    created_at: category.created_at(),
                })
                .collect(),
            categories_id: genre.categories_id().iter().map(ToString::to_string).collect(),
            is_active: genre.is_active(),
            created_at: genre.created_at(),
        }
    }
}

fn parse_category_ids(raw: &[String]) -> Result<Vec<CategoryId>, DomainError> {
    raw.iter().map(|id| id.parse()).collect()
}

/// Genre use cases. Needs the category repository to check and describe
/// the categories a genre refers to.
pub struct GenreService {
    genre_repo: Arc<GenreRepository>,
    category_repo: Arc<dyn Repository<Category>>,
}

impl GenreService {
    pub fn new(genre_repo: Arc<GenreRepository>, category_repo: Arc<dyn Repository<Category>>) -> Self {
        Self {
            genre_repo,
            category_repo,
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name, categories = input.categories_id.len()))]
    pub async fn create_genre(&self, input: CreateGenreInput) -> Result<GenreOutput, ApplicationError> {
        info!("Attempting to create genre");
        let categories_id = parse_category_ids(&input.categories_id)?;
        let categories = self.existing_categories(&categories_id).await?;

        let genre = Genre::create(GenreProps {
            name: input.name,
            categories_id,
            is_active: input.is_active,
            ..Default::default()
        })?;
        self.genre_repo.insert(&genre).await?;
        info!(genre_id = %genre.genre_id(), "Genre created successfully");
        Ok(GenreOutput::build(&genre, &categories))
    }

    #[instrument(skip(self))]
    pub async fn get_genre(&self, id: &str) -> Result<GenreOutput, ApplicationError> {
        let genre = self.find_genre(id).await?;
        let ids: Vec<CategoryId> = genre.categories_id().iter().copied().collect();
        let categories = self.related_categories(&ids).await?;
        Ok(GenreOutput::build(&genre, &categories))
    }

    #[instrument(skip(self, input))]
    pub async fn update_genre(
        &self,
        id: &str,
        input: UpdateGenreInput,
    ) -> Result<GenreOutput, ApplicationError> {
        info!("Attempting to update genre");
        let mut genre = self.find_genre(id).await?;

        if let Some(name) = input.name {
            genre.change_name(name)?;
        }
        if let Some(raw_ids) = input.categories_id {
            let categories_id = parse_category_ids(&raw_ids)?;
            self.existing_categories(&categories_id).await?;
            genre.sync_categories_id(categories_id)?;
        }
        match input.is_active {
            Some(true) => genre.activate(),
            Some(false) => genre.deactivate(),
            None => {}
        }

        self.genre_repo.update(&genre).await?;
        info!(genre_id = %genre.genre_id(), "Genre updated successfully");

        let ids: Vec<CategoryId> = genre.categories_id().iter().copied().collect();
        let categories = self.related_categories(&ids).await?;
        Ok(GenreOutput::build(&genre, &categories))
    }

    #[instrument(skip(self))]
    pub async fn delete_genre(&self, id: &str) -> Result<(), ApplicationError> {
        info!("Attempting to delete genre");
        let genre_id: GenreId = id.parse()?;
        self.genre_repo.delete(&genre_id).await?;
        info!(genre_id = %genre_id, "Genre deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, input), fields(page = ?input.page, per_page = ?input.per_page, sort = ?input.sort))]
    pub async fn list_genres(
        &self,
        input: ListGenresInput,
    ) -> Result<PaginationOutput<GenreOutput>, ApplicationError> {
        let filter = input.filter.map(GenreFilterInput::into_filter).transpose()?;
        let params = SearchParams::new(SearchParamsProps {
            page: input.page,
            per_page: input.per_page,
            sort: input.sort,
            sort_dir: input.sort_dir,
            filter,
        });
        let result = self.genre_repo.search(&params).await?;
        info!(total = result.total, returned = result.items.len(), "Genres listed");

        // One lookup for the categories of the whole page
        let ids: Vec<CategoryId> = result
            .items
            .iter()
            .flat_map(|genre| genre.categories_id().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let categories = self.related_categories(&ids).await?;

        Ok(PaginationOutput::from_search_result(result, |genre| {
            GenreOutput::build(&genre, &categories)
        }))
    }

    async fn find_genre(&self, id: &str) -> Result<Genre, ApplicationError> {
        let genre_id: GenreId = id.parse()?;
        self.genre_repo.find_by_id(&genre_id).await?.ok_or_else(|| {
            warn!(genre_id = %genre_id, "Genre not found");
            ApplicationError::not_found::<Genre>(&genre_id)
        })
    }

    async fn related_categories(
        &self,
        ids: &[CategoryId],
    ) -> Result<HashMap<CategoryId, Category>, ApplicationError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let categories = self.category_repo.find_by_ids(ids).await?;
        Ok(categories
            .into_iter()
            .map(|category| (*category.category_id(), category))
            .collect())
    }

    /// Like `related_categories`, but every id must resolve.
    async fn existing_categories(
        &self,
        ids: &[CategoryId],
    ) -> Result<HashMap<CategoryId, Category>, ApplicationError> {
        let categories = self.related_categories(ids).await?;
        let missing: Vec<CategoryId> = ids
            .iter()
            .filter(|id| !categories.contains_key(*id))
            .copied()
            .collect();
        if !missing.is_empty() {
            warn!(missing = missing.len(), "Genre refers to unknown categories");
            return Err(ApplicationError::not_found_many::<Category>(&missing));
        }
        debug!(count = categories.len(), "All referenced categories exist");
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_input_parses_category_ids() {
        let id = CategoryId::new();
        let filter = GenreFilterInput {
            name: None,
            categories_id: vec![id.to_string()],
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.categories_id, vec![id]);
    }

    #[test]
    fn filter_input_rejects_malformed_id() {
        let result = GenreFilterInput {
            name: None,
            categories_id: vec!["fake id".to_string()],
        }
        .into_filter();
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[test]
    fn output_skips_unknown_categories_but_keeps_ids() {
        let known = Category::new(domain::CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        });
        let unknown = CategoryId::new();
        let genre = Genre::new(GenreProps {
            name: "Action".to_string(),
            categories_id: vec![*known.category_id(), unknown],
            ..Default::default()
        });
        let categories = HashMap::from([(*known.category_id(), known.clone())]);

        let output = GenreOutput::build(&genre, &categories);
        assert_eq!(output.categories.len(), 1);
        assert_eq!(output.categories[0].name, "Movie");
        assert_eq!(output.categories_id.len(), 2);
    }
}
