use crate::entity::validate_name;
use crate::{CategoryId, DomainError, Entity, FieldValue, GenreId, Notification, SearchFilter};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Genre search criteria. A genre matches when its name contains `name`
/// (ignoring case) and it belongs to at least one of `categories_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenreFilter {
    pub name: Option<String>,
    pub categories_id: Vec<CategoryId>,
}

impl SearchFilter for GenreFilter {
    fn is_unset(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty) && self.categories_id.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenreProps {
    pub genre_id: Option<GenreId>,
    pub name: String,
    pub categories_id: Vec<CategoryId>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A genre groups content under one or more categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Genre {
    genre_id: GenreId,
    name: String,
    categories_id: BTreeSet<CategoryId>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Genre {
    pub fn new(props: GenreProps) -> Self {
        Self {
            genre_id: props.genre_id.unwrap_or_default(),
            name: props.name,
            categories_id: props.categories_id.into_iter().collect(),
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn create(props: GenreProps) -> Result<Self, DomainError> {
        let genre = Self::new(props);
        genre.validate()?;
        Ok(genre)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        validate_name(&mut notification, &self.name);
        if self.categories_id.is_empty() {
            notification.add_error("categories_id", "categories_id should not be empty");
        }
        if notification.has_errors() {
            return Err(DomainError::EntityValidation(notification));
        }
        Ok(())
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        let mut notification = Notification::new();
        validate_name(&mut notification, &name);
        if notification.has_errors() {
            return Err(DomainError::EntityValidation(notification));
        }
        self.name = name;
        Ok(())
    }

    pub fn add_category_id(&mut self, category_id: CategoryId) {
        self.categories_id.insert(category_id);
    }

    pub fn remove_category_id(&mut self, category_id: &CategoryId) {
        self.categories_id.remove(category_id);
    }

    /// Replaces every category. An empty list is rejected and leaves the
    /// current categories untouched.
    pub fn sync_categories_id(&mut self, categories_id: Vec<CategoryId>) -> Result<(), DomainError> {
        if categories_id.is_empty() {
            let mut notification = Notification::new();
            notification.add_error("categories_id", "categories_id should not be empty");
            return Err(DomainError::EntityValidation(notification));
        }
        self.categories_id = categories_id.into_iter().collect();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn genre_id(&self) -> &GenreId {
        &self.genre_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories_id(&self) -> &BTreeSet<CategoryId> {
        &self.categories_id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Genre {
    type Id = GenreId;
    const KIND: &'static str = "Genre";

    fn entity_id(&self) -> &GenreId {
        &self.genre_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "is_active" => Some(FieldValue::Bool(self.is_active)),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_categories() {
        let result = Genre::create(GenreProps {
            name: "Action".to_string(),
            ..Default::default()
        });
        assert!(matches!(
            result,
            Err(DomainError::EntityValidation(n)) if n.errors_for("categories_id").len() == 1
        ));
    }

    #[test]
    fn duplicate_category_ids_collapse() {
        let category_id = CategoryId::new();
        let genre = Genre::create(GenreProps {
            name: "Action".to_string(),
            categories_id: vec![category_id, category_id],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(genre.categories_id().len(), 1);
        assert!(genre.is_active());
    }

    #[test]
    fn manage_categories() {
        let first = CategoryId::new();
        let second = CategoryId::new();
        let mut genre = Genre::new(GenreProps {
            name: "Drama".to_string(),
            categories_id: vec![first],
            ..Default::default()
        });

        genre.add_category_id(second);
        assert!(genre.categories_id().contains(&second));

        genre.remove_category_id(&first);
        assert!(!genre.categories_id().contains(&first));

        assert!(genre.sync_categories_id(vec![]).is_err());
        assert_eq!(genre.categories_id().len(), 1);

        genre.sync_categories_id(vec![first]).unwrap();
        assert_eq!(genre.categories_id().iter().copied().collect::<Vec<_>>(), vec![first]);
    }

    #[test]
    fn filter_unset() {
        assert!(GenreFilter::default().is_unset());
        assert!(
            !GenreFilter {
                name: None,
                categories_id: vec![CategoryId::new()]
            }
            .is_unset()
        );
        assert!(
            !GenreFilter {
                name: Some("ac".to_string()),
                categories_id: vec![]
            }
            .is_unset()
        );
    }
}
