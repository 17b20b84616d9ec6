// Search endpoints
//
// Each resource type has its own index endpoint. The combined search fans
// out to all enabled indexes in parallel and returns once every request
// has settled.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{
    DashboardResource, ResourceType, SearchAllQuery, SearchAllResults, SearchResults,
    TableResource, User,
};

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct SearchResponse<T> {
    #[serde(default, alias = "tables", alias = "users", alias = "dashboards")]
    results: SearchResults<T>,
}

impl CatalogClient {
    async fn search<T: DeserializeOwned>(
        &self,
        resource: ResourceType,
        term: &str,
        page_index: u32,
    ) -> Result<SearchResults<T>, Error> {
        let page = page_index.to_string();
        let url = self.api_url_with_query(
            &format!("search/v0/{resource}"),
            &[("query", term), ("page_index", page.as_str())],
        )?;
        debug!(%resource, term, page_index, "searching");
        let resp: SearchResponse<T> = self.get(url).await?;
        Ok(resp.results)
    }

    /// `GET /api/search/v0/table?query=&page_index=`
    pub async fn search_tables(
        &self,
        term: &str,
        page_index: u32,
    ) -> Result<SearchResults<TableResource>, Error> {
        self.search(ResourceType::Table, term, page_index).await
    }

    /// `GET /api/search/v0/user?query=&page_index=`
    pub async fn search_users(
        &self,
        term: &str,
        page_index: u32,
    ) -> Result<SearchResults<User>, Error> {
        self.search(ResourceType::User, term, page_index).await
    }

    /// `GET /api/search/v0/dashboard?query=&page_index=`
    pub async fn search_dashboards(
        &self,
        term: &str,
        page_index: u32,
    ) -> Result<SearchResults<DashboardResource>, Error> {
        self.search(ResourceType::Dashboard, term, page_index).await
    }

    /// Search every enabled index at once.
    ///
    /// Disabled indexes are not queried and come back empty. Fails if any
    /// of the issued requests fails.
    pub async fn search_all(&self, query: &SearchAllQuery) -> Result<SearchAllResults, Error> {
        let term = query.term.as_str();
        let (tables, users, dashboards) = tokio::try_join!(
            self.search_tables(term, query.table_index),
            async {
                if query.include_users {
                    self.search_users(term, query.user_index).await
                } else {
                    Ok(SearchResults::default())
                }
            },
            async {
                if query.include_dashboards {
                    self.search_dashboards(term, query.dashboard_index).await
                } else {
                    Ok(SearchResults::default())
                }
            },
        )?;

        Ok(SearchAllResults {
            search_term: query.term.clone(),
            tables,
            users,
            dashboards,
        })
    }
}
