use super::in_memory_repository::{
    CREATED_AT_DESC, InMemorySearchableRepository, SearchHooks, name_contains,
};
use domain::{CastMember, CastMemberFilter, SortDirection};

#[derive(Debug, Clone, Copy, Default)]
pub struct CastMemberSearchHooks;

impl SearchHooks<CastMember> for CastMemberSearchHooks {
    type Filter = CastMemberFilter;

    fn sortable_fields(&self) -> &[&'static str] {
        &["name", "created_at"]
    }

    /// Each criterion only applies when set; both must hold when both are set.
    fn apply_filter(&self, items: Vec<CastMember>, filter: &CastMemberFilter) -> Vec<CastMember> {
        let name = filter.name.as_deref().filter(|name| !name.is_empty());
        items
            .into_iter()
            .filter(|member| name.is_none_or(|name| name_contains(member.name(), name)))
            .filter(|member| {
                filter
                    .cast_member_type
                    .is_none_or(|wanted| member.cast_member_type() == wanted)
            })
            .collect()
    }

    fn default_sort(&self) -> Option<(&'static str, SortDirection)> {
        Some(CREATED_AT_DESC)
    }
}

pub type CastMemberInMemoryRepository =
    InMemorySearchableRepository<CastMember, CastMemberSearchHooks>;
