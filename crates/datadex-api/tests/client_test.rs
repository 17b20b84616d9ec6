#![allow(clippy::unwrap_used)]
// Integration tests for `CatalogClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use datadex_api::{
    CatalogClient, Credentials, Error, FeedbackForm, NewIssue, NotificationOptions,
    NotificationPayload, NotificationType, PreviewQuery, ResourceType, SearchAllQuery,
    TransportConfig, UpdateMethod,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CatalogClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = CatalogClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

// ── Bookmark tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_bookmarks() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/user/bookmark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "bookmarks": [
                {"key": "hive://gold.core/orders", "type": "table", "name": "orders"},
                {"key": "mode_dashboard://gold.ops/weekly", "type": "dashboard", "name": "weekly"}
            ]
        })))
        .mount(&server)
        .await;

    let bookmarks = client.get_bookmarks(None).await.unwrap();

    assert_eq!(bookmarks.len(), 2);
    assert_eq!(bookmarks[0].key, "hive://gold.core/orders");
    assert_eq!(bookmarks[1].resource_type, ResourceType::Dashboard);
}

#[tokio::test]
async fn test_get_bookmarks_for_other_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/user/bookmark"))
        .and(query_param("user_id", "ada"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "bookmarks": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bookmarks = client.get_bookmarks(Some("ada")).await.unwrap();
    assert!(bookmarks.is_empty());
}

#[tokio::test]
async fn test_add_and_remove_bookmark_send_type_and_key() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/metadata/v0/user/bookmark"))
        .and(body_json(json!({"type": "table", "key": "hive://gold.core/orders"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Success"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/metadata/v0/user/bookmark"))
        .and(body_json(json!({"type": "table", "key": "hive://gold.core/orders"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add_bookmark("hive://gold.core/orders", ResourceType::Table)
        .await
        .unwrap();
    client
        .remove_bookmark("hive://gold.core/orders", ResourceType::Table)
        .await
        .unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn test_service_error_uses_envelope_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/popular_tables"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"msg": "metadata service down"})),
        )
        .mount(&server)
        .await;

    let result = client.get_popular_tables().await;

    match result {
        Err(Error::Service { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "metadata service down");
        }
        other => panic!("expected Service error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_service_error_without_body_uses_reason() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/table"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .get_table("hive://gold.core/missing", None, None)
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "got {err:?}");
    assert!(err.to_string().contains("Not Found"));
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth_user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"msg": "login required"})))
        .mount(&server)
        .await;

    let result = client.get_logged_in_user().await;

    assert!(
        matches!(result, Err(Error::Authentication { status: 401, .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_malformed_body_maps_to_deserialization() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/last_indexed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get_last_indexed().await;

    match result {
        Err(Error::Deserialization { body, .. }) => assert_eq!(body, "<html>oops</html>"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Credentials ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    let transport = TransportConfig {
        credentials: Credentials::Bearer {
            token: "s3cret".to_string().into(),
        },
        ..TransportConfig::default()
    };
    let client = CatalogClient::new(Url::parse(&server.uri()).unwrap(), &transport).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/last_indexed"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"msg": "", "timestamp": 1_700_000_000})),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.get_last_indexed().await.unwrap(), 1_700_000_000);
}

// ── Search ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_search_all_skips_disabled_indexes() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/search/v0/table"))
        .and(query_param("query", "orders"))
        .and(query_param("page_index", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "search_term": "orders",
            "tables": {
                "page_index": 2,
                "total_results": 21,
                "results": [{"key": "hive://gold.core/orders", "name": "orders"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search/v0/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "users": {
                "page_index": 0,
                "total_results": 1,
                "results": [{"user_id": "ada", "display_name": "Ada"}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search/v0/dashboard"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let results = client
        .search_all(&SearchAllQuery {
            term: "orders".into(),
            table_index: 2,
            include_users: true,
            ..SearchAllQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(results.search_term, "orders");
    assert_eq!(results.tables.total_results, 21);
    assert_eq!(results.tables.page_index, 2);
    assert_eq!(results.users.results[0].user_id, "ada");
    assert!(results.dashboards.results.is_empty());
}

#[tokio::test]
async fn test_search_all_fails_when_any_index_fails() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/search/v0/table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tables": {"page_index": 0, "total_results": 0, "results": []}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/search/v0/user"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client
        .search_all(&SearchAllQuery {
            term: "x".into(),
            include_users: true,
            ..SearchAllQuery::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
}

// ── Table metadata ──────────────────────────────────────────────────

#[tokio::test]
async fn test_get_table_passes_navigation_context() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/table"))
        .and(query_param("key", "hive://gold.core/orders"))
        .and(query_param("index", "3"))
        .and(query_param("source", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "tableData": {
                "key": "hive://gold.core/orders",
                "database": "hive",
                "cluster": "gold",
                "schema": "core",
                "name": "orders",
                "description": "All orders",
                "owners": [{"user_id": "ada", "email": "ada@example.com", "display_name": "Ada"}],
                "tags": [{"tag_name": "finance"}],
                "watermarks": [{
                    "watermark_type": "high_watermark",
                    "partition_key": "ds",
                    "partition_value": "2024-01-31",
                    "create_time": "2024-02-01"
                }]
            }
        })))
        .mount(&server)
        .await;

    let table = client
        .get_table("hive://gold.core/orders", Some("3"), Some("search"))
        .await
        .unwrap();

    assert_eq!(table.table.description.as_deref(), Some("All orders"));
    assert_eq!(table.owners[0].email, "ada@example.com");
    assert_eq!(table.tags[0].tag_name, "finance");
    assert_eq!(table.table.watermarks[0].partition_value, "2024-01-31");
}

#[tokio::test]
async fn test_update_owner_uses_requested_method() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/metadata/v0/update_table_owner"))
        .and(body_json(json!({"key": "k", "owner": "ada"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Success"})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .update_table_owner("k", "ada", UpdateMethod::Delete)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_column_description_round_trip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/get_column_description"))
        .and(query_param("column_name", "amount"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "description": "Order total in cents"
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/metadata/v0/put_column_description"))
        .and(body_json(json!({
            "key": "k",
            "column_name": "amount",
            "description": "Order total",
            "source": "user"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let desc = client.get_column_description("k", "amount").await.unwrap();
    assert_eq!(desc, "Order total in cents");
    client
        .put_column_description("k", "amount", "Order total")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_lineage() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/metadata/v0/get_table_lineage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "k",
            "upstream_entities": [{"key": "up", "level": 1}],
            "downstream_entities": [{"key": "down1", "level": 1}, {"key": "down2", "level": 2}]
        })))
        .mount(&server)
        .await;

    let lineage = client.get_table_lineage("k").await.unwrap();
    assert_eq!(lineage.upstream_entities.len(), 1);
    assert_eq!(lineage.downstream_entities[1].level, 2);
}

// ── Preview / issues / mail ─────────────────────────────────────────

#[tokio::test]
async fn test_preview_posts_camel_case_table_name() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/preview/v0/"))
        .and(body_json(json!({
            "database": "hive",
            "schema": "core",
            "tableName": "orders",
            "cluster": "gold"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "previewData": {
                "columns": [{"column_name": "id", "column_type": "int"}],
                "data": [{"id": 1}, {"id": 2}]
            }
        })))
        .mount(&server)
        .await;

    let preview = client
        .get_preview_data(&PreviewQuery {
            database: "hive".into(),
            schema: "core".into(),
            table_name: "orders".into(),
            cluster: "gold".into(),
        })
        .await
        .unwrap();

    assert_eq!(preview.columns[0].column_name, "id");
    assert_eq!(preview.data.len(), 2);
}

#[tokio::test]
async fn test_issues() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/issue/issues"))
        .and(query_param("key", "k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "issues": {
                "issues": [{"issue_key": "DATA-1", "title": "nulls", "url": "https://t/DATA-1"}],
                "remaining": 4,
                "remaining_url": "https://t/search"
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/issue/issue"))
        .and(body_json(json!({"key": "k", "title": "dupes", "description": "rows doubled"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "issue": {"issue_key": "DATA-2", "title": "dupes", "url": "https://t/DATA-2"}
        })))
        .mount(&server)
        .await;

    let page = client.get_issues("k").await.unwrap();
    assert_eq!(page.remaining, 4);
    assert_eq!(page.issues[0].issue_key, "DATA-1");

    let created = client
        .create_issue(&NewIssue {
            key: "k".into(),
            title: "dupes".into(),
            description: "rows doubled".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.url, "https://t/DATA-2");
}

#[tokio::test]
async fn test_feedback_is_form_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/mail/v0/feedback"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("feedback-type=NPS+Rating"))
        .and(body_string_contains("rating=9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"msg": "Success"})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .submit_feedback(&FeedbackForm::Rating {
            rating: 9,
            comment: "great".into(),
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_notification() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/mail/v0/notification"))
        .and(body_json(json!({
            "recipients": ["owner@example.com"],
            "sender": "me@example.com",
            "notificationType": "requested",
            "options": {"resource_name": "core.orders", "description_requested": true}
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .send_notification(&NotificationPayload {
            recipients: vec!["owner@example.com".into()],
            sender: "me@example.com".into(),
            notification_type: NotificationType::Requested,
            options: NotificationOptions {
                resource_name: Some("core.orders".into()),
                description_requested: Some(true),
                ..NotificationOptions::default()
            },
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_announcements() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/announcements/v0/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "msg": "Success",
            "posts": [{"date": "Jan 1", "title": "Hello", "html_content": "<p>hi</p>"}]
        })))
        .mount(&server)
        .await;

    let posts = client.get_announcements().await.unwrap();
    assert_eq!(posts[0].title, "Hello");
}
