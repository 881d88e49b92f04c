//! Client for the external GraphQL data service.
//!
//! Sends parameterized [`GraphQlRequest`](ayah_core::graphql::GraphQlRequest)
//! documents over HTTP with bearer-token auth and unwraps the GraphQL
//! `{ data, errors }` envelope.

pub mod client;

pub use client::{GraphQlClient, GraphQlError, GraphQlExecutor};
