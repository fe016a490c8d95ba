//! HTTP plumbing: the authenticated client, query builder, session store
//! and wire types.

pub mod client;
pub mod query;
pub mod session;
pub mod types;
