// Bookmark endpoints
//
// All three verbs share one path; the resource to add or remove travels
// in the JSON body as `{type, key}`.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{Bookmark, ResourceType};

const BOOKMARK_PATH: &str = "metadata/v0/user/bookmark";

#[derive(Deserialize)]
struct BookmarksResponse {
    #[serde(default)]
    bookmarks: Vec<Bookmark>,
}

impl CatalogClient {
    /// List bookmarks for the logged-in user, or for `user_id` when given.
    ///
    /// `GET /api/metadata/v0/user/bookmark[?user_id=]`
    pub async fn get_bookmarks(&self, user_id: Option<&str>) -> Result<Vec<Bookmark>, Error> {
        let url = match user_id {
            Some(id) => self.api_url_with_query(BOOKMARK_PATH, &[("user_id", id)])?,
            None => self.api_url(BOOKMARK_PATH)?,
        };
        debug!(user_id, "fetching bookmarks");
        let resp: BookmarksResponse = self.get(url).await?;
        Ok(resp.bookmarks)
    }

    /// Bookmark a resource for the logged-in user.
    ///
    /// `PUT /api/metadata/v0/user/bookmark` with `{"type": "...", "key": "..."}`
    pub async fn add_bookmark(&self, key: &str, resource_type: ResourceType) -> Result<(), Error> {
        let url = self.api_url(BOOKMARK_PATH)?;
        debug!(key, %resource_type, "adding bookmark");
        self.send_json_unit(
            Method::PUT,
            url,
            &json!({ "type": resource_type, "key": key }),
        )
        .await
    }

    /// Remove a bookmark for the logged-in user.
    ///
    /// `DELETE /api/metadata/v0/user/bookmark` with `{"type": "...", "key": "..."}`
    pub async fn remove_bookmark(
        &self,
        key: &str,
        resource_type: ResourceType,
    ) -> Result<(), Error> {
        let url = self.api_url(BOOKMARK_PATH)?;
        debug!(key, %resource_type, "removing bookmark");
        self.send_json_unit(
            Method::DELETE,
            url,
            &json!({ "type": resource_type, "key": key }),
        )
        .await
    }
}
