//! Label tables for numeric email categories, email types and ecard
//! categories.
//!
//! The backend only stores ids. Labels come from a JSON file shaped like
//! `{"categories": {"0": "New Year"}, "types": {"1": "Newsletter"}}`; an id
//! without a label renders as `#<id>`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("failed to read lookup file {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("lookup file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lookup id is not a number: {0}")]
    BadId(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTables {
    categories: BTreeMap<String, String>,
    types: BTreeMap<String, String>,
    ecard_categories: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables {
    categories: BTreeMap<u16, String>,
    types: BTreeMap<u16, String>,
    ecard_categories: BTreeMap<u16, String>,
}

fn parse_ids(raw: BTreeMap<String, String>) -> Result<BTreeMap<u16, String>, LookupError> {
    raw.into_iter()
        .map(|(id, label)| {
            id.trim()
                .parse::<u16>()
                .map(|id| (id, label))
                .map_err(|_| LookupError::BadId(id))
        })
        .collect()
}

fn label(table: &BTreeMap<u16, String>, id: u16) -> String {
    table.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}

impl LookupTables {
    /// # Errors
    ///
    /// Returns [`LookupError`] for malformed JSON or non-numeric ids.
    pub fn from_json(text: &str) -> Result<Self, LookupError> {
        let raw: RawTables = serde_json::from_str(text)?;
        Ok(Self {
            categories: parse_ids(raw.categories)?,
            types: parse_ids(raw.types)?,
            ecard_categories: parse_ids(raw.ecard_categories)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`LookupError::Io`] if the file cannot be read, else parse errors.
    pub fn load(path: &Path) -> Result<Self, LookupError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| LookupError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&text)
    }

    #[must_use]
    pub fn category(&self, id: u16) -> String {
        label(&self.categories, id)
    }

    #[must_use]
    pub fn email_type(&self, id: u16) -> String {
        label(&self.types, id)
    }

    #[must_use]
    pub fn ecard_category(&self, id: u16) -> String {
        label(&self.ecard_categories, id)
    }

    /// Label for an optional id; `-` when unset.
    #[must_use]
    pub fn category_opt(&self, id: Option<u16>) -> String {
        id.map_or_else(|| "-".to_owned(), |id| self.category(id))
    }

    #[must_use]
    pub fn email_type_opt(&self, id: Option<u16>) -> String {
        id.map_or_else(|| "-".to_owned(), |id| self.email_type(id))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.types.is_empty() && self.ecard_categories.is_empty()
    }
}

#[cfg(test)]
#[path = "lookup_test.rs"]
mod tests;
