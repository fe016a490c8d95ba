//! Sorting and paging for list views.

use std::cmp::Ordering;

use super::filters::Searchable;
use crate::net::types::Paginated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(field: &str) -> Self {
        Self { field: field.to_owned(), direction: SortDirection::Ascending }
    }

    #[must_use]
    pub fn descending(field: &str) -> Self {
        Self { field: field.to_owned(), direction: SortDirection::Descending }
    }

    /// Parse the backend's ordering syntax, `-field` for descending.
    #[must_use]
    pub fn parse(ordering: &str) -> Option<Self> {
        let ordering = ordering.trim();
        match ordering.strip_prefix('-') {
            Some("") => None,
            Some(field) => Some(Self::descending(field)),
            None if ordering.is_empty() => None,
            None => Some(Self::ascending(ordering)),
        }
    }

    /// Render as the backend's `ordering` parameter.
    #[must_use]
    pub fn ordering(&self) -> String {
        match self.direction {
            SortDirection::Ascending => self.field.clone(),
            SortDirection::Descending => format!("-{}", self.field),
        }
    }

    /// Same field toggles direction; a new field sorts ascending.
    #[must_use]
    pub fn toggled(current: Option<&Self>, field: &str) -> Self {
        match current {
            Some(spec) if spec.field == field && spec.direction == SortDirection::Ascending => Self::descending(field),
            _ => Self::ascending(field),
        }
    }
}

/// Numbers compare numerically, everything else case-insensitively. Missing
/// values sort last in either direction.
fn compare_values(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.total_cmp(&y),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `records` in place.
pub fn sort_records<R: Searchable>(records: &mut [R], sort: &SortSpec) {
    records.sort_by(|a, b| {
        let left = a.field(&sort.field);
        let right = b.field(&sort.field);
        let ordering = compare_values(left.as_deref(), right.as_deref());
        match (sort.direction, left.is_some() && right.is_some()) {
            (SortDirection::Descending, true) => ordering.reverse(),
            _ => ordering,
        }
    });
}

/// Paging position for a table, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl PageInfo {
    #[must_use]
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self { page: page.max(1), page_size: page_size.max(1), total }
    }

    /// From a server page envelope.
    #[must_use]
    pub fn from_page<T>(page: u32, page_size: u32, response: &Paginated<T>) -> Self {
        Self::new(page, page_size, response.count)
    }

    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size)).max(1)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Index range of this page within the full record list.
    #[must_use]
    pub fn range(&self) -> std::ops::Range<usize> {
        let size = self.page_size as usize;
        let start = (self.page as usize).saturating_sub(1).saturating_mul(size);
        let total = usize::try_from(self.total).unwrap_or(usize::MAX);
        start.min(total)..start.saturating_add(size).min(total)
    }
}

/// Slice one page out of locally held records.
#[must_use]
pub fn paginate<T>(records: &[T], page: u32, page_size: u32) -> (&[T], PageInfo) {
    let info = PageInfo::new(page, page_size, records.len() as u64);
    (&records[info.range()], info)
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
