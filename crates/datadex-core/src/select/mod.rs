// ── Selectors ──
//
// Pure projections of the state tree into what a view renders. Nothing
// here is stored; every value is recomputed from a snapshot.

mod stats;
mod tabs;

use chrono::{DateTime, Utc};

use crate::model::{TableKey, TableMetadata, WatermarkType};
use crate::store::GlobalState;

pub use stats::{filter_out_unique_values, format_stat_value, stat_epoch_range, stats_info_text};
pub use tabs::{Tab, bookmark_tabs, lineage_tabs};

const LAST_INDEXED_FORMAT: &str = "%b %d, %Y %H:%M UTC";

pub fn is_bookmarked(state: &GlobalState, key: &str) -> bool {
    state.bookmarks().my_bookmarks.iter().any(|b| b.key == key)
}

/// Who a notification about the current table comes from and goes to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationContext {
    /// Logged-in user's email, empty when unknown.
    pub sender: String,
    /// Owner keys of the table on the detail page.
    pub recipients: Vec<String>,
}

pub fn notification_context(state: &GlobalState) -> NotificationContext {
    NotificationContext {
        sender: state
            .user()
            .logged_in_user
            .as_ref()
            .map(|user| user.email.clone())
            .unwrap_or_default(),
        recipients: state
            .table_metadata()
            .owners
            .owners
            .keys()
            .cloned()
            .collect(),
    }
}

/// `/table_detail/{cluster}/{database}/{schema}/{table}` for a loaded table.
pub fn table_detail_path(table: &TableMetadata) -> String {
    TableKey::from_metadata(table).detail_path()
}

pub fn last_indexed_text(state: &GlobalState) -> Option<String> {
    let epoch = state.last_indexed().last_indexed?;
    let time = DateTime::<Utc>::from_timestamp(epoch, 0)?;
    Some(time.format(LAST_INDEXED_FORMAT).to_string())
}

const ELLIPSIS: &str = "...";

/// Shorten an issue title to at most `max` characters, marking the cut
/// with `...`. Below four characters there is no room for a marker and
/// the title is cut bare.
pub fn issue_display_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_owned();
    }
    if max <= ELLIPSIS.len() {
        return title.chars().take(max).collect();
    }
    let kept: String = title.chars().take(max - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// `key=value` of the newest partition, if the table is partitioned.
pub fn partition_text(table: &TableMetadata) -> Option<String> {
    table
        .watermarks
        .iter()
        .find(|w| w.watermark_type == WatermarkType::HighWatermark)
        .map(|w| format!("{}={}", w.partition_key, w.partition_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Reducer;
    use crate::feature::last_indexed::LastIndexedMessage;
    use crate::message::Async;
    use crate::model::Watermark;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_titles_are_truncated_on_char_boundaries() {
        assert_eq!(issue_display_title("short", 10), "short");
        assert_eq!(issue_display_title("abcdefghijkl", 10), "abcdefg...");
        assert_eq!(issue_display_title("ééééééé", 5), "éé...");
    }

    #[test]
    fn tiny_limits_never_exceed_max() {
        assert_eq!(issue_display_title("abcdef", 3), "abc");
        assert_eq!(issue_display_title("abcdef", 1), "a");
        assert_eq!(issue_display_title("abcdef", 0), "");
        assert_eq!(issue_display_title("ab", 2), "ab");
    }

    #[test]
    fn partition_comes_from_high_watermark() {
        let table = TableMetadata {
            watermarks: vec![
                Watermark {
                    watermark_type: WatermarkType::LowWatermark,
                    partition_key: "ds".into(),
                    partition_value: "2019-01-01".into(),
                    create_time: String::new(),
                },
                Watermark {
                    watermark_type: WatermarkType::HighWatermark,
                    partition_key: "ds".into(),
                    partition_value: "2019-10-21".into(),
                    create_time: String::new(),
                },
            ],
            ..TableMetadata::default()
        };
        assert_eq!(partition_text(&table).as_deref(), Some("ds=2019-10-21"));
        assert_eq!(partition_text(&TableMetadata::default()), None);
    }

    #[test]
    fn last_indexed_is_formatted_in_utc() {
        let state = GlobalState::default()
            .reduce(&LastIndexedMessage::GetLastIndexed(Async::Success(1_571_654_700)).into());
        let text = last_indexed_text(&state).unwrap_or_default();
        insta::assert_snapshot!(text, @"Oct 21, 2019 10:45 UTC");
        assert_eq!(last_indexed_text(&GlobalState::default()), None);
    }

    #[test]
    fn detail_path_uses_cluster_first() {
        let table = TableMetadata {
            database: "hive".into(),
            cluster: "gold".into(),
            schema: "core".into(),
            name: "orders".into(),
            ..TableMetadata::default()
        };
        assert_eq!(table_detail_path(&table), "/table_detail/gold/hive/core/orders");
    }

    #[test]
    fn empty_state_has_no_sender_or_recipients() {
        assert_eq!(
            notification_context(&GlobalState::default()),
            NotificationContext::default()
        );
    }
}
