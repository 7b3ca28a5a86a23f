use serde::{Deserialize, Serialize};

use crate::domain::entities::filter::FilterValue;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub String);

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId(value)
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId(value.to_string())
    }
}

impl From<usize> for RowId {
    fn from(value: usize) -> Self {
        RowId(value.to_string())
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub id: String,
    pub value: FilterValue,
}

/// The single contract handed to every data source, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    pub page_index: usize,
    pub page_size: usize,
    pub sorting: Vec<SortSpec>,
    pub filters: Vec<ColumnFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_filter: Option<String>,
}

impl QueryParams {
    pub fn first_page(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
            sorting: Vec::new(),
            filters: Vec::new(),
            global_filter: None,
        }
    }

    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Trimmed global search term, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.global_filter
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult<R> {
    pub rows: Vec<R>,
    pub total: usize,
}
