// Table preview endpoint

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{PreviewData, PreviewQuery};

#[derive(Deserialize)]
struct PreviewResponse {
    #[serde(rename = "previewData", default)]
    preview_data: PreviewData,
}

impl CatalogClient {
    /// Fetch a sample of rows for a table.
    ///
    /// `POST /api/preview/v0/` with `{"database", "schema", "tableName", "cluster"}`
    pub async fn get_preview_data(&self, query: &PreviewQuery) -> Result<PreviewData, Error> {
        let url = self.api_url("preview/v0/")?;
        debug!(table = %query.table_name, "fetching preview data");
        let resp: PreviewResponse = self.send_json(Method::POST, url, query).await?;
        Ok(resp.preview_data)
    }
}
