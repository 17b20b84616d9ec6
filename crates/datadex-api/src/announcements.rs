// Announcement endpoints

use serde::Deserialize;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::AnnouncementPost;

#[derive(Deserialize)]
struct AnnouncementsResponse {
    #[serde(default)]
    posts: Vec<AnnouncementPost>,
}

impl CatalogClient {
    /// Fetch the current announcement posts.
    ///
    /// `GET /api/announcements/v0/`
    pub async fn get_announcements(&self) -> Result<Vec<AnnouncementPost>, Error> {
        let url = self.api_url("announcements/v0/")?;
        debug!("fetching announcements");
        let resp: AnnouncementsResponse = self.get(url).await?;
        Ok(resp.posts)
    }
}
