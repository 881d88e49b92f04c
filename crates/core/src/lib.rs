//! Domain core for verse bookmarks.
//!
//! Holds the bookmark data model, label parsing, the GraphQL document
//! builders used by the API layer, and the shared error taxonomy. This crate
//! performs no I/O so it can be used by both the server and the panel.

pub mod bookmark;
pub mod error;
pub mod graphql;
pub mod labels;
pub mod query;
pub mod types;
