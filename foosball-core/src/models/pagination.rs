//! Pagination types
//!
//! Paging is cursor based: a page carries the id of its last record as
//! `nextToken` when more records may follow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default cap on the total number of records a listing returns
pub const DEFAULT_MAX_RESULT: u32 = 1000;

/// Default number of records fetched per round trip
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Ordering by id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(alias = "ASC", alias = "Asc")]
    Asc,
    #[serde(alias = "DESC", alias = "Desc")]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Pagination parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Records per round trip to the backend
    pub page_size: u32,
    /// Total cap across all round trips
    pub max_result: u32,
    /// Resume after this id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl PageRequest {
    pub fn new(page_size: u32, max_result: u32) -> Self {
        Self {
            page_size,
            max_result,
            next_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Records a single backend request may return.
    pub fn take(&self) -> usize {
        self.page_size.min(self.max_result) as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_RESULT)
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page_size: Option<u32>,
    pub max_result: Option<u32>,
    pub next_token: Option<String>,
    pub order: Option<SortOrder>,
}

impl PaginationParams {
    /// Fill in missing values, using `default_page_size` for the page size.
    pub fn into_request(self, default_page_size: u32) -> (PageRequest, SortOrder) {
        let request = PageRequest {
            page_size: self.page_size.unwrap_or(default_page_size),
            max_result: self.max_result.unwrap_or(DEFAULT_MAX_RESULT),
            next_token: self.next_token.filter(|token| !token.is_empty()),
        };
        (request, self.order.unwrap_or_default())
    }
}

/// One page (or an accumulation of pages) of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            next_token: None,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
