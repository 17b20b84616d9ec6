// Wire types shared by the catalog service endpoints.
//
// Field names follow the services' JSON. Everything the services may omit
// carries `#[serde(default)]` so partial records from older deployments
// still deserialize.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

// ── Resources ───────────────────────────────────────────────────────

/// The kinds of resource the catalog indexes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceType {
    #[default]
    Table,
    User,
    Dashboard,
}

impl ResourceType {
    /// Every resource type, in tab order.
    pub const ALL: [Self; 3] = [Self::Table, Self::Dashboard, Self::User];

    /// Human-facing plural label used for tabs and headings.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Table => "Datasets",
            Self::User => "People",
            Self::Dashboard => "Dashboards",
        }
    }
}

/// A bookmarked resource as returned by the bookmark endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub key: String,
    #[serde(rename = "type", default)]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub last_updated_timestamp: Option<i64>,
}

/// A table as it appears in search results and popular-table listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableResource {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub last_updated_timestamp: Option<i64>,
}

/// A dashboard search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResource {
    pub uri: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub group_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub last_successful_run_timestamp: Option<i64>,
}

/// A catalog user (search hit, table owner, reader, or logged-in user).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub role_name: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// One page of search hits for a single resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults<T> {
    #[serde(default)]
    pub page_index: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u32,
}

impl<T> Default for SearchResults<T> {
    fn default() -> Self {
        Self {
            page_index: 0,
            results: Vec::new(),
            total_results: 0,
        }
    }
}

/// Combined result of the table + user + dashboard fan-out search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAllResults {
    pub search_term: String,
    pub tables: SearchResults<TableResource>,
    pub users: SearchResults<User>,
    pub dashboards: SearchResults<DashboardResource>,
}

/// Which pages to fetch for a combined search, and which optional indexes
/// are enabled on this deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchAllQuery {
    pub term: String,
    pub table_index: u32,
    pub user_index: u32,
    pub dashboard_index: u32,
    pub include_users: bool,
    pub include_dashboards: bool,
}

// ── Tags ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_count: Option<u32>,
}

// ── Table metadata ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnStat {
    pub stat_type: String,
    #[serde(default)]
    pub stat_val: String,
    #[serde(default)]
    pub start_epoch: Option<i64>,
    #[serde(default)]
    pub end_epoch: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub col_type: String,
    #[serde(default)]
    pub sort_order: u32,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(default)]
    pub stats: Vec<ColumnStat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkType {
    #[default]
    LowWatermark,
    HighWatermark,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watermark {
    pub watermark_type: WatermarkType,
    #[serde(default)]
    pub partition_key: String,
    #[serde(default)]
    pub partition_value: String,
    #[serde(default)]
    pub create_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableWriter {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSource {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReader {
    #[serde(default)]
    pub read_count: u64,
    #[serde(default)]
    pub user: User,
}

/// Table detail payload, without owners and tags (those live in their own
/// state slices once normalized).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_editable: bool,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default)]
    pub columns: Vec<TableColumn>,
    #[serde(default)]
    pub watermarks: Vec<Watermark>,
    #[serde(default)]
    pub table_writer: Option<TableWriter>,
    #[serde(default)]
    pub source: Option<TableSource>,
    #[serde(default)]
    pub table_readers: Vec<TableReader>,
    #[serde(default)]
    pub last_updated_timestamp: Option<i64>,
}

/// Raw `tableData` object: metadata plus the owners and tags lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDataResponse {
    #[serde(flatten)]
    pub table: TableMetadata,
    #[serde(default)]
    pub owners: Vec<User>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageItem {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub cluster: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub usage: Option<u64>,
    #[serde(default)]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    #[serde(default)]
    pub upstream_entities: Vec<LineageItem>,
    #[serde(default)]
    pub downstream_entities: Vec<LineageItem>,
}

/// HTTP verb used by the owner and tag update endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum UpdateMethod {
    Put,
    Delete,
}

impl UpdateMethod {
    pub(crate) fn as_http(self) -> reqwest::Method {
        match self {
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

// ── Preview ─────────────────────────────────────────────────────────

/// Identifies the table to sample rows from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewQuery {
    pub database: String,
    pub schema: String,
    #[serde(rename = "tableName")]
    pub table_name: String,
    pub cluster: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewColumn {
    pub column_name: String,
    #[serde(default)]
    pub column_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewData {
    #[serde(default)]
    pub columns: Vec<PreviewColumn>,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub error_text: Option<String>,
}

// ── Issues ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub issue_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority_name: Option<String>,
    #[serde(default)]
    pub priority_display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesPage {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub remaining: u32,
    #[serde(default)]
    pub remaining_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub key: String,
    pub title: String,
    pub description: String,
}

// ── Announcements ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementPost {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub html_content: String,
}

// ── Mail ────────────────────────────────────────────────────────────

/// Feedback form variants accepted by the mail service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackForm {
    Rating {
        rating: u8,
        comment: String,
    },
    Request {
        feature_summary: String,
        value_prop: String,
        subject: String,
    },
    BugReport {
        bug_summary: String,
        repro_steps: String,
        subject: String,
    },
}

impl FeedbackForm {
    /// The `feedback-type` discriminator the mail service templates on.
    pub fn feedback_type(&self) -> &'static str {
        match self {
            Self::Rating { .. } => "NPS Rating",
            Self::Request { .. } => "Feature Request",
            Self::BugReport { .. } => "Bug Report",
        }
    }

    /// Form-encoded field list, in submission order.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = match self {
            Self::Rating { rating, comment } => vec![
                ("rating", rating.to_string()),
                ("comment", comment.clone()),
            ],
            Self::Request {
                feature_summary,
                value_prop,
                subject,
            } => vec![
                ("subject", subject.clone()),
                ("feature-summary", feature_summary.clone()),
                ("value-prop", value_prop.clone()),
            ],
            Self::BugReport {
                bug_summary,
                repro_steps,
                subject,
            } => vec![
                ("subject", subject.clone()),
                ("bug-summary", bug_summary.clone()),
                ("repro-steps", repro_steps.clone()),
            ],
        };
        fields.push(("feedback-type", self.feedback_type().to_owned()));
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationType {
    Added,
    Removed,
    Edited,
    Requested,
    DataIssueReported,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields_requested: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_issue_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub recipients: Vec<String>,
    pub sender: String,
    #[serde(rename = "notificationType")]
    pub notification_type: NotificationType,
    pub options: NotificationOptions,
}
