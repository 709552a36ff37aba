use crate::category::deserialize_some;
use crate::{ApplicationError, PaginationOutput, SearchableRepository};
use chrono::{DateTime, Utc};
use domain::{Event, EventFilter, EventId, EventProps, SearchParams, SearchParamsProps};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub type EventRepository = dyn SearchableRepository<Event, EventFilter>;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateEventInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateEventInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

pub type ListEventsInput = SearchParamsProps<EventFilter>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EventOutput {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Event> for EventOutput {
    fn from(event: &Event) -> Self {
        Self {
            id: event.event_id().to_string(),
            name: event.name().to_string(),
            description: event.description().map(str::to_string),
            is_active: event.is_active(),
            created_at: event.created_at(),
        }
    }
}

pub struct EventService {
    event_repo: Arc<EventRepository>,
}

impl EventService {
    pub fn new(event_repo: Arc<EventRepository>) -> Self {
        Self { event_repo }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_event(&self, input: CreateEventInput) -> Result<EventOutput, ApplicationError> {
        info!("Attempting to create event");
        let event = Event::create(EventProps {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
            ..Default::default()
        })?;
        self.event_repo.insert(&event).await?;
        info!(event_id = %event.event_id(), "Event created successfully");
        Ok(EventOutput::from(&event))
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: &str) -> Result<EventOutput, ApplicationError> {
        let event = self.find_event(id).await?;
        Ok(EventOutput::from(&event))
    }

    #[instrument(skip(self, input))]
    pub async fn update_event(
        &self,
        id: &str,
        input: UpdateEventInput,
    ) -> Result<EventOutput, ApplicationError> {
        info!("Attempting to update event");
        let mut event = self.find_event(id).await?;

        if let Some(name) = input.name {
            event.change_name(name)?;
        }
        if let Some(description) = input.description {
            event.change_description(description);
        }
        match input.is_active {
            Some(true) => event.activate(),
            Some(false) => event.deactivate(),
            None => {}
        }

        self.event_repo.update(&event).await?;
        info!(event_id = %event.event_id(), "Event updated successfully");
        Ok(EventOutput::from(&event))
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: &str) -> Result<(), ApplicationError> {
        info!("Attempting to delete event");
        let event_id: EventId = id.parse()?;
        self.event_repo.delete(&event_id).await?;
        info!(event_id = %event_id, "Event deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, input), fields(page = ?input.page, per_page = ?input.per_page, sort = ?input.sort))]
    pub async fn list_events(
        &self,
        input: ListEventsInput,
    ) -> Result<PaginationOutput<EventOutput>, ApplicationError> {
        let params = SearchParams::new(input);
        let result = self.event_repo.search(&params).await?;
        info!(total = result.total, returned = result.items.len(), "Events listed");
        Ok(PaginationOutput::from_search_result(result, |event| EventOutput::from(&event)))
    }

    async fn find_event(&self, id: &str) -> Result<Event, ApplicationError> {
        let event_id: EventId = id.parse()?;
        self.event_repo.find_by_id(&event_id).await?.ok_or_else(|| {
            warn!(event_id = %event_id, "Event not found");
            ApplicationError::not_found::<Event>(&event_id)
        })
    }
}
