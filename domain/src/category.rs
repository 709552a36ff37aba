use crate::entity::validate_name;
use crate::{CategoryId, DomainError, Entity, FieldValue, Notification};
use chrono::{DateTime, Utc};

/// Categories are filtered by a case-insensitive fragment of their name.
pub type CategoryFilter = String;

/// Constructor properties. Unset optional values take their defaults.
#[derive(Debug, Clone, Default)]
pub struct CategoryProps {
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Builds a category without validating it, e.g. when loading stored data.
    pub fn new(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    /// Builds and validates a new category.
    pub fn create(props: CategoryProps) -> Result<Self, DomainError> {
        let category = Self::new(props);
        category.validate()?;
        Ok(category)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        validate_name(&mut notification, &self.name);
        if notification.has_errors() {
            return Err(DomainError::EntityValidation(notification));
        }
        Ok(())
    }

    /// Renames the category. The current name is kept if `name` is invalid.
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

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Category {
    type Id = CategoryId;
    const KIND: &'static str = "Category";

    fn entity_id(&self) -> &CategoryId {
        &self.category_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "description" => self.description.clone().map(FieldValue::Text),
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
    fn new_applies_defaults() {
        let before = Utc::now();
        let category = Category::new(CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        });
        assert_eq!(category.name(), "Movie");
        assert_eq!(category.description(), None);
        assert!(category.is_active());
        assert!(category.created_at() >= before);
    }

    #[test]
    fn new_keeps_given_values() {
        let id = CategoryId::new();
        let created_at = Utc::now();
        let category = Category::new(CategoryProps {
            category_id: Some(id),
            name: "Movie".to_string(),
            description: Some("some description".to_string()),
            is_active: Some(false),
            created_at: Some(created_at),
        });
        assert_eq!(category.entity_id(), &id);
        assert_eq!(category.description(), Some("some description"));
        assert!(!category.is_active());
        assert_eq!(category.created_at(), created_at);
    }

    #[test]
    fn create_rejects_invalid_name() {
        let result = Category::create(CategoryProps {
            name: "t".repeat(256),
            ..Default::default()
        });
        assert!(
            matches!(result, Err(DomainError::EntityValidation(n)) if n.errors_for("name").len() == 1)
        );
    }

    #[test]
    fn change_name_keeps_old_name_on_error() {
        let mut category = Category::create(CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert!(category.change_name("").is_err());
        assert_eq!(category.name(), "Movie");

        category.change_name("Documentary").unwrap();
        assert_eq!(category.name(), "Documentary");
    }

    #[test]
    fn toggles_and_description() {
        let mut category = Category::new(CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        });
        category.deactivate();
        assert!(!category.is_active());
        category.activate();
        assert!(category.is_active());
        category.change_description(Some("desc".to_string()));
        assert_eq!(category.description(), Some("desc"));
        category.change_description(None);
        assert_eq!(category.description(), None);
    }

    #[test]
    fn exposes_sortable_values() {
        let category = Category::new(CategoryProps {
            name: "Movie".to_string(),
            ..Default::default()
        });
        assert_eq!(
            category.field_value("name"),
            Some(FieldValue::Text("Movie".to_string()))
        );
        assert!(matches!(
            category.field_value("created_at"),
            Some(FieldValue::Timestamp(_))
        ));
        assert_eq!(category.field_value("unknown"), None);
    }
}
