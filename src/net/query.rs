//! Query-string construction from filter objects.
//!
//! Only non-empty fields reach the wire: `None`, empty strings and
//! whitespace-only strings are dropped, so the backend never sees
//! `?search=&page=`.

use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

/// Filter objects that know how to render themselves as query parameters.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` unless the rendered value is blank.
    #[must_use]
    pub fn push(mut self, key: &str, value: impl Display) -> Self {
        let rendered = value.to_string();
        let trimmed = rendered.trim();
        if !trimmed.is_empty() {
            self.pairs.push((key.to_owned(), trimmed.to_owned()));
        }
        self
    }

    #[must_use]
    pub fn push_opt<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append every entry of a column-filter map.
    #[must_use]
    pub fn extend_map(self, map: &BTreeMap<String, String>) -> Self {
        map.iter().fold(self, |params, (k, v)| params.push(k, v))
    }

    /// Append every pair of `other`, keeping order.
    #[must_use]
    pub fn merge(mut self, other: QueryParams) -> Self {
        self.pairs.extend(other.pairs);
        self
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Page request shared by every list endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ToQuery for PageRequest {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("page", self.page)
            .push_opt("page_size", self.page_size)
    }
}

/// Free-text search plus ordering and paging, as used by every list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    /// Backend ordering expression, `-field` for descending.
    pub ordering: Option<String>,
    pub page: PageRequest,
    pub filters: BTreeMap<String, String>,
}

impl ToQuery for ListQuery {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .push_opt("search", self.search.as_deref())
            .push_opt("ordering", self.ordering.as_deref())
            .extend_map(&self.filters)
            .merge(self.page.to_query())
    }
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
