use crate::Notification;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Maximum length of any entity name.
pub const NAME_MAX_LENGTH: usize = 255;

/// An aggregate with a stable identity.
///
/// Two entities denote the same thing when their ids are equal, whatever
/// their other attributes hold.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Clone + PartialEq + fmt::Display + Send + Sync + 'static;

    /// Human-readable entity kind, used in "not found" messages.
    const KIND: &'static str;

    fn entity_id(&self) -> &Self::Id;

    /// Value of a named attribute for ordering purposes. `None` if the
    /// entity has no such attribute.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// A typed attribute value with a natural ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Natural ordering between two values of the same kind. Strings compare
    /// case-sensitively. Mismatched kinds compare equal.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }

    /// Compares optional values; a missing value sorts before a present one.
    pub fn compare_options(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.compare(b),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Shared name rules: not blank, at most [`NAME_MAX_LENGTH`] characters.
pub(crate) fn validate_name(notification: &mut Notification, name: &str) {
    if name.trim().is_empty() {
        notification.add_error("name", "name should not be empty");
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        notification.add_error(
            "name",
            format!("name must be shorter than or equal to {NAME_MAX_LENGTH} characters"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn text_ordering_is_case_sensitive() {
        let upper = FieldValue::Text("AAA".to_string());
        let mixed = FieldValue::Text("AaA".to_string());
        let lower = FieldValue::Text("a".to_string());
        assert_eq!(upper.compare(&mixed), Ordering::Less);
        assert_eq!(mixed.compare(&lower), Ordering::Less);
    }

    #[test]
    fn timestamps_and_integers_use_natural_order() {
        let now = Utc::now();
        let later = now + Duration::milliseconds(100);
        assert_eq!(
            FieldValue::Timestamp(now).compare(&FieldValue::Timestamp(later)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(10).compare(&FieldValue::Integer(9)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Integer(1).compare(&FieldValue::Text("1".to_string())),
            Ordering::Equal
        );
    }

    #[test]
    fn missing_values_sort_first() {
        let value = FieldValue::Bool(true);
        assert_eq!(FieldValue::compare_options(None, Some(&value)), Ordering::Less);
        assert_eq!(FieldValue::compare_options(Some(&value), None), Ordering::Greater);
        assert_eq!(FieldValue::compare_options(None, None), Ordering::Equal);
    }

    #[test]
    fn name_rules() {
        let mut notification = Notification::new();
        validate_name(&mut notification, "Movie");
        assert!(!notification.has_errors());

        validate_name(&mut notification, "   ");
        validate_name(&mut notification, &"a".repeat(256));
        assert_eq!(notification.errors_for("name").len(), 2);
    }
}
