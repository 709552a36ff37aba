use crate::entity::validate_name;
use crate::{DomainError, Entity, EventId, FieldValue, Notification};
use chrono::{DateTime, Utc};

pub type EventFilter = String;

#[derive(Debug, Clone, Default)]
pub struct EventProps {
    pub event_id: Option<EventId>,
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A catalog event, active unless told otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    event_id: EventId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(props: EventProps) -> Self {
        Self {
            event_id: props.event_id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            is_active: props.is_active.unwrap_or(true),
            created_at: props.created_at.unwrap_or_else(Utc::now),
        }
    }

    pub fn create(props: EventProps) -> Result<Self, DomainError> {
        let event = Self::new(props);
        event.validate()?;
        Ok(event)
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

    pub fn change_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
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

impl Entity for Event {
    type Id = EventId;
    const KIND: &'static str = "Event";

    fn entity_id(&self) -> &EventId {
        &self.event_id
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
