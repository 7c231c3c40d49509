use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SECTION: &str = "sport";

/// Sort order requested from the search API.
///
/// Unknown values are carried verbatim so the API can decide what to do
/// with them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
    Other(String),
}

impl OrderBy {
    pub fn as_str(&self) -> &str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
            OrderBy::Other(value) => value,
        }
    }

    /// Cycle through the known orders; `Other` falls back to `Newest`.
    pub fn next(&self) -> Self {
        match self {
            OrderBy::Newest => OrderBy::Oldest,
            OrderBy::Oldest => OrderBy::Relevance,
            OrderBy::Relevance | OrderBy::Other(_) => OrderBy::Newest,
        }
    }
}

impl From<String> for OrderBy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "newest" => OrderBy::Newest,
            "oldest" => OrderBy::Oldest,
            "relevance" => OrderBy::Relevance,
            _ => OrderBy::Other(value),
        }
    }
}

impl From<OrderBy> for String {
    fn from(value: OrderBy) -> Self {
        match value {
            OrderBy::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for OrderBy {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OrderBy::from(s.to_string()))
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preferences that shape a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub section: String,
    pub order_by: OrderBy,
}

impl QueryParams {
    pub fn new(section: impl Into<String>, order_by: OrderBy) -> Self {
        Self {
            section: section.into(),
            order_by,
        }
    }
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            order_by: OrderBy::Newest,
        }
    }
}
