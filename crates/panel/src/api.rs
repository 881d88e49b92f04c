//! Client for the bookmark HTTP endpoints.

use std::time::Duration;

use async_trait::async_trait;
use ayah_core::bookmark::{Bookmark, BookmarkList, BookmarkMutation};
use ayah_core::types::AuthorId;
use serde::Deserialize;

use crate::error::PanelError;

/// Timeout for a single call to the bookmark endpoints.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The two bookmark endpoints as seen by the panel.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    /// `GET /api/bookmarks`. An empty `search_term` means unfiltered.
    async fn list(
        &self,
        author_id: AuthorId,
        search_term: &str,
    ) -> Result<Vec<Bookmark>, PanelError>;

    /// `POST /api/bookmark`. Returns the data service's mutation result.
    async fn mutate(&self, mutation: &BookmarkMutation) -> Result<serde_json::Value, PanelError>;
}

/// reqwest-backed [`BookmarkApi`].
pub struct HttpBookmarkApi {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpBookmarkApi {
    /// * `base_url` - Origin serving the API, e.g. `http://localhost:3000`.
    /// * `access_token` - Session token sent as a bearer credential.
    pub fn new(base_url: String, access_token: Option<String>) -> Result<Self, PanelError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, base_url, access_token))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        access_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Read a success body as JSON, or turn a non-2xx answer into
    /// [`PanelError::Status`] carrying the server's `error` message.
    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PanelError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error);
            return Err(PanelError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl BookmarkApi for HttpBookmarkApi {
    async fn list(
        &self,
        author_id: AuthorId,
        search_term: &str,
    ) -> Result<Vec<Bookmark>, PanelError> {
        let request = self
            .client
            .get(format!("{}/api/bookmarks", self.base_url))
            .query(&[
                ("author", author_id.to_string()),
                ("searchTerm", search_term.to_string()),
            ]);

        let response = self.authorize(request).send().await?;
        let list: BookmarkList = Self::read_json(response).await?;
        Ok(list.users_bookmarks)
    }

    async fn mutate(&self, mutation: &BookmarkMutation) -> Result<serde_json::Value, PanelError> {
        let request = self
            .client
            .post(format!("{}/api/bookmark", self.base_url))
            .json(mutation);

        let response = self.authorize(request).send().await?;
        Self::read_json(response).await
    }
}
