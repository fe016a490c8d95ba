//! Pure helpers shared by the services and the CLI.

pub mod lookup;
pub mod placeholder;
pub mod recipients;
