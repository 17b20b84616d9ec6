// Data issue endpoints (backed by the configured issue tracker)

use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{Issue, IssuesPage, NewIssue};

#[derive(Deserialize)]
struct IssuesResponse {
    #[serde(default)]
    issues: IssuesPage,
}

#[derive(Deserialize)]
struct CreateIssueResponse {
    issue: Issue,
}

impl CatalogClient {
    /// List open issues reported against a table.
    ///
    /// `GET /api/issue/issues?key=`
    pub async fn get_issues(&self, table_key: &str) -> Result<IssuesPage, Error> {
        let url = self.api_url_with_query("issue/issues", &[("key", table_key)])?;
        debug!(table_key, "fetching issues");
        let resp: IssuesResponse = self.get(url).await?;
        Ok(resp.issues)
    }

    /// File a new issue against a table.
    ///
    /// `POST /api/issue/issue` with `{"key", "title", "description"}`
    pub async fn create_issue(&self, issue: &NewIssue) -> Result<Issue, Error> {
        let url = self.api_url("issue/issue")?;
        debug!(table_key = %issue.key, "creating issue");
        let resp: CreateIssueResponse = self.send_json(Method::POST, url, issue).await?;
        Ok(resp.issue)
    }
}
