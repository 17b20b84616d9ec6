// Column statistics shown on the table detail page.

use chrono::{DateTime, Utc};

use crate::model::ColumnStat;

/// Stat types that are too large to render inline.
const HIDDEN_STAT_TYPES: &[&str] = &["unique_values"];

const STATS_DATE_FORMAT: &str = "%b %d, %Y";

pub fn filter_out_unique_values(stats: &[ColumnStat]) -> Vec<ColumnStat> {
    stats
        .iter()
        .filter(|stat| !HIDDEN_STAT_TYPES.contains(&stat.stat_type.as_str()))
        .cloned()
        .collect()
}

/// Earliest start and latest end epoch of one column's displayed stats.
/// Hidden stat types do not widen the range.
pub fn stat_epoch_range(stats: &[ColumnStat]) -> (Option<i64>, Option<i64>) {
    let shown = stats
        .iter()
        .filter(|stat| !HIDDEN_STAT_TYPES.contains(&stat.stat_type.as_str()));
    let start = shown.clone().filter_map(|stat| stat.start_epoch).min();
    let end = shown.filter_map(|stat| stat.end_epoch).max();
    (start, end)
}

fn format_date(epoch: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(epoch, 0).map(|dt| dt.format(STATS_DATE_FORMAT).to_string())
}

/// Caption explaining which period the stats cover.
pub fn stats_info_text(start_epoch: Option<i64>, end_epoch: Option<i64>) -> String {
    let start = start_epoch.and_then(format_date);
    let end = end_epoch.and_then(format_date);

    let period = match (start, end) {
        (Some(start), Some(end)) if start == end => format!(" on {start} only. (daily partition)"),
        (Some(start), Some(end)) => format!(" between {start} and {end}."),
        _ => " over a recent period of time.".to_owned(),
    };
    format!("Stats reflect data collected{period}")
}

/// Group the integer part of a numeric stat with commas. Anything that
/// is not a plain number is returned as is.
pub fn format_stat_value(raw: &str) -> String {
    let trimmed = raw.trim();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(integer) || fraction.is_some_and(|f| !is_digits(f)) {
        return raw.to_owned();
    }

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
