// Metadata service endpoints: tables, descriptions, owners, tags,
// lineage, popular tables, and index freshness.

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{Lineage, TableDataResponse, TableResource, Tag, UpdateMethod};

#[derive(Deserialize)]
struct TableResponse {
    #[serde(rename = "tableData")]
    table_data: TableDataResponse,
}

#[derive(Deserialize)]
struct DescriptionResponse {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Deserialize)]
struct PopularTablesResponse {
    #[serde(default)]
    results: Vec<TableResource>,
}

#[derive(Deserialize)]
struct LastIndexedResponse {
    timestamp: i64,
}

impl CatalogClient {
    // ── Table detail ─────────────────────────────────────────────────

    /// Fetch full table metadata, including owners and tags.
    ///
    /// `GET /api/metadata/v0/table?key=&index=&source=`
    ///
    /// `index` and `source` record where the user navigated from (search
    /// result position, browse page) and are optional.
    pub async fn get_table(
        &self,
        key: &str,
        index: Option<&str>,
        source: Option<&str>,
    ) -> Result<TableDataResponse, Error> {
        let mut params = vec![("key", key)];
        if let Some(index) = index {
            params.push(("index", index));
        }
        if let Some(source) = source {
            params.push(("source", source));
        }
        let url = self.api_url_with_query("metadata/v0/table", &params)?;
        debug!(key, "fetching table metadata");
        let resp: TableResponse = self.get(url).await?;
        Ok(resp.table_data)
    }

    /// `GET /api/metadata/v0/get_table_description?key=`
    pub async fn get_table_description(&self, key: &str) -> Result<String, Error> {
        let url =
            self.api_url_with_query("metadata/v0/get_table_description", &[("key", key)])?;
        let resp: DescriptionResponse = self.get(url).await?;
        Ok(resp.description.unwrap_or_default())
    }

    /// `PUT /api/metadata/v0/put_table_description`
    pub async fn put_table_description(&self, key: &str, description: &str) -> Result<(), Error> {
        let url = self.api_url("metadata/v0/put_table_description")?;
        debug!(key, "updating table description");
        self.send_json_unit(
            Method::PUT,
            url,
            &json!({ "key": key, "description": description, "source": "user" }),
        )
        .await
    }

    /// `GET /api/metadata/v0/get_column_description?key=&column_name=`
    pub async fn get_column_description(
        &self,
        key: &str,
        column_name: &str,
    ) -> Result<String, Error> {
        let url = self.api_url_with_query(
            "metadata/v0/get_column_description",
            &[("key", key), ("column_name", column_name)],
        )?;
        let resp: DescriptionResponse = self.get(url).await?;
        Ok(resp.description.unwrap_or_default())
    }

    /// `PUT /api/metadata/v0/put_column_description`
    pub async fn put_column_description(
        &self,
        key: &str,
        column_name: &str,
        description: &str,
    ) -> Result<(), Error> {
        let url = self.api_url("metadata/v0/put_column_description")?;
        debug!(key, column_name, "updating column description");
        self.send_json_unit(
            Method::PUT,
            url,
            &json!({
                "key": key,
                "column_name": column_name,
                "description": description,
                "source": "user",
            }),
        )
        .await
    }

    // ── Owners & tags ────────────────────────────────────────────────

    /// Add (`PUT`) or remove (`DELETE`) a table owner.
    ///
    /// `PUT|DELETE /api/metadata/v0/update_table_owner` with `{"key", "owner"}`
    pub async fn update_table_owner(
        &self,
        key: &str,
        owner: &str,
        method: UpdateMethod,
    ) -> Result<(), Error> {
        let url = self.api_url("metadata/v0/update_table_owner")?;
        debug!(key, owner, %method, "updating table owner");
        self.send_json_unit(method.as_http(), url, &json!({ "key": key, "owner": owner }))
            .await
    }

    /// Add (`PUT`) or remove (`DELETE`) a table tag.
    ///
    /// `PUT|DELETE /api/metadata/v0/update_table_tags` with `{"key", "tag"}`
    pub async fn update_table_tag(
        &self,
        key: &str,
        tag: &str,
        method: UpdateMethod,
    ) -> Result<(), Error> {
        let url = self.api_url("metadata/v0/update_table_tags")?;
        debug!(key, tag, %method, "updating table tag");
        self.send_json_unit(method.as_http(), url, &json!({ "key": key, "tag": tag }))
            .await
    }

    /// Every tag known to the catalog, with usage counts.
    ///
    /// `GET /api/metadata/v0/tags`
    pub async fn get_all_tags(&self) -> Result<Vec<Tag>, Error> {
        let url = self.api_url("metadata/v0/tags")?;
        let resp: TagsResponse = self.get(url).await?;
        Ok(resp.tags)
    }

    // ── Lineage ──────────────────────────────────────────────────────

    /// `GET /api/metadata/v0/get_table_lineage?key=`
    pub async fn get_table_lineage(&self, key: &str) -> Result<Lineage, Error> {
        let url = self.api_url_with_query("metadata/v0/get_table_lineage", &[("key", key)])?;
        debug!(key, "fetching lineage");
        self.get(url).await
    }

    // ── Home page ────────────────────────────────────────────────────

    /// `GET /api/metadata/v0/popular_tables`
    pub async fn get_popular_tables(&self) -> Result<Vec<TableResource>, Error> {
        let url = self.api_url("metadata/v0/popular_tables")?;
        let resp: PopularTablesResponse = self.get(url).await?;
        Ok(resp.results)
    }

    /// When the search index was last rebuilt, as epoch seconds.
    ///
    /// `GET /api/metadata/v0/last_indexed`
    pub async fn get_last_indexed(&self) -> Result<i64, Error> {
        let url = self.api_url("metadata/v0/last_indexed")?;
        let resp: LastIndexedResponse = self.get(url).await?;
        Ok(resp.timestamp)
    }
}
