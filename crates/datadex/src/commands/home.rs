//! Home page command handlers: popular tables, announcements, tags, and
//! index freshness.

use serde::Serialize;
use tabled::Tabled;

use datadex_core::feature::{announcements, last_indexed, popular_tables, tags};
use datadex_core::{AnnouncementPost, Store, Tag, select};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::search::TableRow;
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct AnnouncementRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl From<&AnnouncementPost> for AnnouncementRow {
    fn from(p: &AnnouncementPost) -> Self {
        Self {
            date: p.date.clone(),
            title: p.title.clone(),
        }
    }
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    name: String,
    #[tabled(rename = "Tables")]
    count: String,
}

impl From<&Tag> for TagRow {
    fn from(t: &Tag) -> Self {
        Self {
            name: t.tag_name.clone(),
            count: t.tag_count.map(|c| c.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct LastIndexed {
    timestamp: Option<i64>,
    text: Option<String>,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn popular(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::request(store, popular_tables::get_popular_tables(), "popular tables").await?;
    let out = output::render_list(
        &global.output(),
        &state.popular_tables().tables,
        |t| TableRow::from(t),
        |t| t.key.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn announcements(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::request_with_status(
        store,
        announcements::get_announcements(),
        "announcements",
        |s| s.announcements().status_code,
    )
    .await?;
    let out = output::render_list(
        &global.output(),
        &state.announcements().posts,
        |p| AnnouncementRow::from(p),
        |p| p.title.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn last_indexed(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::request(store, last_indexed::get_last_indexed(), "last indexed").await?;
    let value = LastIndexed {
        timestamp: state.last_indexed().last_indexed,
        text: select::last_indexed_text(&state),
    };
    let out = output::render_single(
        &global.output(),
        &value,
        |v| format!("Last indexed: {}", v.text.as_deref().unwrap_or("unknown")),
        |v| v.timestamp.map(|t| t.to_string()).unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn tags(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::request(store, tags::get_all_tags(), "tags").await?;
    let out = output::render_list(
        &global.output(),
        &state.tags().all_tags,
        |t| TagRow::from(t),
        |t| t.tag_name.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
