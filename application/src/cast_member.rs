use crate::{ApplicationError, PaginationOutput, SearchableRepository};
use chrono::{DateTime, Utc};
use domain::{
    CastMember, CastMemberFilter, CastMemberId, CastMemberProps, CastMemberType, DomainError,
    SearchParams, SearchParamsProps,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub type CastMemberRepository = dyn SearchableRepository<CastMember, CastMemberFilter>;

#[derive(Deserialize, Debug, Clone)]
pub struct CreateCastMemberInput {
    pub name: String,
    #[serde(rename = "type")]
    pub cast_member_type: i64,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct UpdateCastMemberInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub cast_member_type: Option<i64>,
}

/// Filter as received from callers; the type is still a raw code.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CastMemberFilterInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub cast_member_type: Option<i64>,
}

impl CastMemberFilterInput {
    fn into_filter(self) -> Result<CastMemberFilter, DomainError> {
        let cast_member_type = self
            .cast_member_type
            .map(CastMemberType::try_from)
            .transpose()?;
        Ok(CastMemberFilter {
            name: self.name,
            cast_member_type,
        })
    }
}

pub type ListCastMembersInput = SearchParamsProps<CastMemberFilterInput>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CastMemberOutput {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub cast_member_type: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&CastMember> for CastMemberOutput {
    fn from(cast_member: &CastMember) -> Self {
        Self {
            id: cast_member.cast_member_id().to_string(),
            name: cast_member.name().to_string(),
            cast_member_type: cast_member.cast_member_type().code(),
            created_at: cast_member.created_at(),
        }
    }
}

pub struct CastMemberService {
    cast_member_repo: Arc<CastMemberRepository>,
}

impl CastMemberService {
    pub fn new(cast_member_repo: Arc<CastMemberRepository>) -> Self {
        Self { cast_member_repo }
    }

    #[instrument(skip(self, input), fields(name = %input.name, cast_member_type = input.cast_member_type))]
    pub async fn create_cast_member(
        &self,
        input: CreateCastMemberInput,
    ) -> Result<CastMemberOutput, ApplicationError> {
        info!("Attempting to create cast member");
        let cast_member_type = CastMemberType::try_from(input.cast_member_type)?;
        let cast_member = CastMember::create(CastMemberProps {
            cast_member_id: None,
            name: input.name,
            cast_member_type,
            created_at: None,
        })?;
        self.cast_member_repo.insert(&cast_member).await?;
        info!(cast_member_id = %cast_member.cast_member_id(), "Cast member created successfully");
        Ok(CastMemberOutput::from(&cast_member))
    }

    #[instrument(skip(self))]
    pub async fn get_cast_member(&self, id: &str) -> Result<CastMemberOutput, ApplicationError> {
        let cast_member = self.find_cast_member(id).await?;
        Ok(CastMemberOutput::from(&cast_member))
    }

    #[instrument(skip(self, input))]
    pub async fn update_cast_member(
        &self,
        id: &str,
        input: UpdateCastMemberInput,
    ) -> Result<CastMemberOutput, ApplicationError> {
        info!("Attempting to update cast member");
        let mut cast_member = self.find_cast_member(id).await?;

        if let Some(name) = input.name {
            cast_member.change_name(name)?;
        }
        if let Some(code) = input.cast_member_type {
            cast_member.change_type(CastMemberType::try_from(code)?);
        }

        self.cast_member_repo.update(&cast_member).await?;
        info!(cast_member_id = %cast_member.cast_member_id(), "Cast member updated successfully");
        Ok(CastMemberOutput::from(&cast_member))
    }

    #[instrument(skip(self))]
    pub async fn delete_cast_member(&self, id: &str) -> Result<(), ApplicationError> {
        info!("Attempting to delete cast member");
        let cast_member_id: CastMemberId = id.parse()?;
        self.cast_member_repo.delete(&cast_member_id).await?;
        info!(cast_member_id = %cast_member_id, "Cast member deleted successfully");
        Ok(())
    }

    #[instrument(skip(self, input), fields(page = ?input.page, per_page = ?input.per_page, sort = ?input.sort))]
    pub async fn list_cast_members(
        &self,
        input: ListCastMembersInput,
    ) -> Result<PaginationOutput<CastMemberOutput>, ApplicationError> {
        let filter = input
            .filter
            .map(CastMemberFilterInput::into_filter)
            .transpose()?;
        let params = SearchParams::new(SearchParamsProps {
            page: input.page,
            per_page: input.per_page,
            sort: input.sort,
            sort_dir: input.sort_dir,
            filter,
        });
        let result = self.cast_member_repo.search(&params).await?;
        info!(total = result.total, returned = result.items.len(), "Cast members listed");
        Ok(PaginationOutput::from_search_result(result, |cast_member| {
            CastMemberOutput::from(&cast_member)
        }))
    }

    async fn find_cast_member(&self, id: &str) -> Result<CastMember, ApplicationError> {
        let cast_member_id: CastMemberId = id.parse()?;
        self.cast_member_repo
            .find_by_id(&cast_member_id)
            .await?
            .ok_or_else(|| {
                warn!(cast_member_id = %cast_member_id, "Cast member not found");
                ApplicationError::not_found::<CastMember>(&cast_member_id)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_input_converts_type_code() {
        let filter = CastMemberFilterInput {
            name: Some("jo".to_string()),
            cast_member_type: Some(2),
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.cast_member_type, Some(CastMemberType::Actor));
        assert_eq!(filter.name.as_deref(), Some("jo"));
    }

    #[test]
    fn filter_input_rejects_unknown_type() {
        let result = CastMemberFilterInput {
            name: None,
            cast_member_type: Some(7),
        }
        .into_filter();
        assert_eq!(result, Err(DomainError::InvalidCastMemberType(7)));
    }

    #[test]
    fn create_input_reads_type_key() {
        let input: CreateCastMemberInput =
            serde_json::from_str(r#"{"name": "John", "type": 1}"#).unwrap();
        assert_eq!(input.cast_member_type, 1);
    }
}
