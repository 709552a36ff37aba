//! Search descriptors shared by every searchable repository.
//!
//! [`SearchParams`] normalizes loosely typed input instead of rejecting it,
//! and [`SearchResult`] carries one page of items with its pagination
//! metadata.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Reads a direction from user input. Only `desc` (any case) means
    /// descending; everything else falls back to ascending.
    pub fn from_param(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A filter value understood by one entity's filter predicate.
pub trait SearchFilter {
    /// `true` when the filter carries no criteria and must be treated as absent.
    fn is_unset(&self) -> bool;
}

impl SearchFilter for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

/// Raw, unvalidated search options as received from a caller.
///
/// Deserialization never fails on a wrongly typed `page`, `per_page`, `sort`
/// or `sort_dir`: such values are read as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchParamsProps<F> {
    #[serde(default, deserialize_with = "lenient_page_number")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_page_number")]
    pub per_page: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sort_dir: Option<String>,
    #[serde(default)]
    pub filter: Option<F>,
}

impl<F> Default for SearchParamsProps<F> {
    fn default() -> Self {
        Self {
            page: None,
            per_page: None,
            sort: None,
            sort_dir: None,
            filter: None,
        }
    }
}

/// Any self-describing value, read without failing.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_page_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Integer(value)) => Some(value),
        Some(LooseValue::Float(value)) => integral(value),
        Some(LooseValue::Text(value)) => parse_page_number(Some(&value)),
        Some(LooseValue::Other(_)) | None => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(value)) => Some(value),
        _ => None,
    })
}

fn integral(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
}

/// Parses a page number from text. Integral text (`"2"`, `"2.0"`) is kept;
/// non-numeric and fractional input (`"abc"`, `"2.5"`) yields `None`, which
/// later coerces to the default.
pub fn parse_page_number(raw: Option<&str>) -> Option<i64> {
    let value = raw?.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().and_then(integral))
}

/// Normalized search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams<F> {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<F>,
}

impl<F: SearchFilter> SearchParams<F> {
    pub fn new(props: SearchParamsProps<F>) -> Self {
        let page = match props.page {
            Some(page) if page > 0 => page as u64,
            _ => DEFAULT_PAGE,
        };
        let per_page = match props.per_page {
            Some(per_page) if per_page > 0 => per_page as u64,
            _ => DEFAULT_PER_PAGE,
        };
        let sort = props.sort.filter(|sort| !sort.is_empty());
        // A direction only means something alongside a sort field
        let sort_dir = sort.as_ref().map(|_| {
            props
                .sort_dir
                .as_deref()
                .map(SortDirection::from_param)
                .unwrap_or_default()
        });
        let filter = props.filter.filter(|filter| !filter.is_unset());

        Self {
            page,
            per_page,
            sort,
            sort_dir,
            filter,
        }
    }
}

impl<F> SearchParams<F> {
    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&F> {
        self.filter.as_ref()
    }

    /// Index of the first item of the requested page.
    pub fn offset(&self) -> usize {
        let offset = (self.page - 1).saturating_mul(self.per_page);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Page size as a `take` bound.
    pub fn limit(&self) -> usize {
        usize::try_from(self.per_page).unwrap_or(usize::MAX)
    }
}

impl<F: SearchFilter> Default for SearchParams<F> {
    fn default() -> Self {
        Self::new(SearchParamsProps::default())
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<T> {
    /// Items of the requested page, in result order.
    pub items: Vec<T>,
    /// Number of items matching the filter before pagination.
    pub total: usize,
    pub current_page: u64,
    pub per_page: u64,
    /// `ceil(total / per_page)`, never below 1.
    pub last_page: u64,
}

impl<T> SearchResult<T> {
    pub fn new(items: Vec<T>, total: usize, current_page: u64, per_page: u64) -> Self {
        let per_page = per_page.max(1);
        let last_page = (total as u64).div_ceil(per_page).max(1);
        Self {
            items,
            total,
            current_page: current_page.max(1),
            per_page,
            last_page,
        }
    }

    /// Converts the items while keeping the pagination metadata.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> SearchResult<U> {
        SearchResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            current_page: self.current_page,
            per_page: self.per_page,
            last_page: self.last_page,
        }
    }
}
