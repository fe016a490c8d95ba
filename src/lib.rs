//! Admin client for the BlazingSocial email and ecard platform.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`net::client::ApiClient`] owns transport and authentication. Typed
//! wrappers for each backend collection live in [`services`]. List-screen
//! state (filters, debounce, caching, sorting) lives in [`state`], and pure
//! helpers for placeholders, recipients and label lookups in [`util`].

pub mod config;
pub mod error;
pub mod net;
pub mod services;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_helpers;

pub use config::ClientConfig;
pub use error::{ApiError, FieldErrors};
pub use net::client::ApiClient;
pub use net::session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
