//! Transport-neutral GraphQL request document.

use serde::Serialize;

/// A GraphQL operation with its typed variables.
///
/// User-supplied values only ever travel in `variables`; the `query`
/// document is assembled from static fragments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: serde_json::Value,
    pub operation_name: &'static str,
}
