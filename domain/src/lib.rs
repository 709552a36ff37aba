use thiserror::Error; // For domain-specific errors

pub mod cast_member;
pub mod category;
pub mod entity;
pub mod event;
pub mod genre;
pub mod ids;
pub mod notification;
pub mod search;

pub use cast_member::{CastMember, CastMemberFilter, CastMemberProps, CastMemberType};
pub use category::{Category, CategoryFilter, CategoryProps};
pub use entity::{Entity, FieldValue};
pub use event::{Event, EventFilter, EventProps};
pub use genre::{Genre, GenreFilter, GenreProps};
pub use ids::{CastMemberId, CategoryId, EventId, GenreId};
pub use notification::Notification;
pub use search::{
    DEFAULT_PAGE, DEFAULT_PER_PAGE, SearchFilter, SearchParams, SearchParamsProps, SearchResult,
    SortDirection, parse_page_number,
};

// --- Domain Errors ---
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Entity validation failed: {0}")]
    EntityValidation(Notification),
    #[error("Invalid id '{value}': {reason}")]
    InvalidId { value: String, reason: String },
    #[error("Invalid cast member type: {0}")]
    InvalidCastMemberType(i64),
}
