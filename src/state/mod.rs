//! Client-side state for list screens: filters, debounce, caching, table
//! shaping, plus the typed settings and distribution status models.

pub mod debounce;
pub mod distribution;
pub mod filters;
pub mod query_cache;
pub mod settings;
pub mod table;
