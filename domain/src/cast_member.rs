use crate::entity::validate_name;
use crate::{CastMemberId, DomainError, Entity, FieldValue, Notification, SearchFilter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a cast member. Serialized as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum CastMemberType {
    Director = 1,
    Actor = 2,
}

impl CastMemberType {
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for CastMemberType {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CastMemberType::Director),
            2 => Ok(CastMemberType::Actor),
            other => Err(DomainError::InvalidCastMemberType(other)),
        }
    }
}

impl From<CastMemberType> for i64 {
    fn from(value: CastMemberType) -> Self {
        value.code()
    }
}

/// Both criteria are optional; a cast member must satisfy every one given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastMemberFilter {
    pub name: Option<String>,
    pub cast_member_type: Option<CastMemberType>,
}

impl SearchFilter for CastMemberFilter {
    fn is_unset(&self) -> bool {
        self.name.as_deref().is_none_or(str::is_empty) && self.cast_member_type.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CastMemberProps {
    pub cast_member_id: Option<CastMemberId>,
    pub name: String,
    pub cast_member_type: CastMemberType,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastMember {
    cast_member_id: CastMemberId,
    name: String,
    cast_member_type: CastMemberType,
    created_at: DateTime<Utc>,
}

impl CastMember {
    pub fn new(props: CastMemberProps) -> Self {
        Self {
            cast_member_id: props.cast_member_id.unwrap_or_default(),
            name: props.name,
            cast_member_type: props.cast_member_type,
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn create(props: CastMemberProps) -> Result<Self, DomainError> {
        let cast_member = Self::new(props);
        cast_member.validate()?;
        Ok(cast_member)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut notification = Notification::new();
        validate_name(&mut notification, &self.name);
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

    pub fn change_type(&mut self, cast_member_type: CastMemberType) {
        self.cast_member_type = cast_member_type;
    }

    pub fn cast_member_id(&self) -> &CastMemberId {
        &self.cast_member_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cast_member_type(&self) -> CastMemberType {
        self.cast_member_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for CastMember {
    type Id = CastMemberId;
    const KIND: &'static str = "CastMember";

    fn entity_id(&self) -> &CastMemberId {
        &self.cast_member_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "type" => Some(FieldValue::Integer(self.cast_member_type.code())),
            "created_at" => Some(FieldValue::Timestamp(self.created_at)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(name: &str, cast_member_type: CastMemberType) -> CastMemberProps {
        CastMemberProps {
            cast_member_id: None,
            name: name.to_string(),
            cast_member_type,
            created_at: None,
        }
    }

    #[test]
    fn type_codes() {
        assert_eq!(CastMemberType::try_from(1).unwrap(), CastMemberType::Director);
        assert_eq!(CastMemberType::try_from(2).unwrap(), CastMemberType::Actor);
        assert_eq!(
            CastMemberType::try_from(3),
            Err(DomainError::InvalidCastMemberType(3))
        );
        assert_eq!(
            DomainError::InvalidCastMemberType(0).to_string(),
            "Invalid cast member type: 0"
        );
    }

    #[test]
    fn type_serializes_as_number() {
        assert_eq!(serde_json::to_string(&CastMemberType::Actor).unwrap(), "2");
        let parsed: CastMemberType = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, CastMemberType::Director);
        assert!(serde_json::from_str::<CastMemberType>("9").is_err());
    }

    #[test]
    fn create_and_change() {
        let mut member = CastMember::create(props("John", CastMemberType::Actor)).unwrap();
        assert_eq!(member.name(), "John");
        member.change_type(CastMemberType::Director);
        assert_eq!(member.cast_member_type(), CastMemberType::Director);
        assert_eq!(member.field_value("type"), Some(FieldValue::Integer(1)));
        assert!(member.change_name(" ").is_err());
        assert_eq!(member.name(), "John");
    }

    #[test]
    fn create_rejects_long_name() {
        let result = CastMember::create(props(&"n".repeat(256), CastMemberType::Actor));
        assert!(matches!(result, Err(DomainError::EntityValidation(_))));
    }

    #[test]
    fn filter_unset() {
        assert!(CastMemberFilter::default().is_unset());
        assert!(
            CastMemberFilter {
                name: Some(String::new()),
                cast_member_type: None
            }
            .is_unset()
        );
        assert!(
            !CastMemberFilter {
                name: None,
                cast_member_type: Some(CastMemberType::Actor)
            }
            .is_unset()
        );
    }
}
