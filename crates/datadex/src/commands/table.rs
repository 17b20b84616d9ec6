//! Table detail command: load a table, apply any requested edits, then
//! render the sections asked for.

use std::fmt::Write as _;

use serde::Serialize;
use tabled::Tabled;
use tabled::builder::Builder;
use tabled::settings::Style;

use datadex_core::feature::table_metadata::{self, OwnerUpdate, TagUpdate};
use datadex_core::{
    GlobalState, Lineage, LineageItem, PreviewData, Store, TableColumn, TableKey, TableMetadata,
    Tag, UpdateMethod, User, select,
};

use crate::cli::{GlobalOpts, OutputFormat, TableArgs};
use crate::error::CliError;
use crate::output;

use super::search::UserRow;
use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ColumnRow {
    #[tabled(rename = "Column")]
    name: String,
    #[tabled(rename = "Type")]
    col_type: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Stats")]
    stats: String,
}

impl From<&TableColumn> for ColumnRow {
    fn from(c: &TableColumn) -> Self {
        let shown = select::filter_out_unique_values(&c.stats);
        let mut lines: Vec<String> = shown
            .iter()
            .map(|s| format!("{}: {}", s.stat_type, select::format_stat_value(&s.stat_val)))
            .collect();
        if !shown.is_empty() {
            let (start, end) = select::stat_epoch_range(&c.stats);
            lines.push(select::stats_info_text(start, end));
        }
        let stats = lines.join("\n");
        Self {
            name: c.name.clone(),
            col_type: c.col_type.clone(),
            description: c.description.clone().unwrap_or_default(),
            stats,
        }
    }
}

#[derive(Tabled)]
struct LineageRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Level")]
    level: u32,
    #[tabled(rename = "Usage")]
    usage: String,
}

impl From<&LineageItem> for LineageRow {
    fn from(l: &LineageItem) -> Self {
        Self {
            key: l.key.clone(),
            level: l.level,
            usage: l.usage.map(|u| u.to_string()).unwrap_or_default(),
        }
    }
}

/// Structured output shape for json / yaml.
#[derive(Serialize)]
struct TableView<'a> {
    table: &'a TableMetadata,
    path: String,
    owners: Vec<&'a User>,
    tags: &'a [Tag],
    #[serde(skip_serializing_if = "Option::is_none")]
    lineage: Option<&'a Lineage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<&'a PreviewData>,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: TableArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let key: TableKey = args.key.parse()?;

    let state = util::request_with_status(
        store,
        table_metadata::get_table_data(&args.key, None, Some("cli".into())),
        "get table",
        |s| s.table_metadata().status_code,
    )
    .await
    .map_err(|e| match e {
        CliError::RequestFailed {
            status: Some(404), ..
        } => CliError::NotFound {
            resource_type: "table".into(),
            identifier: args.key.clone(),
        },
        other => other,
    })?;

    apply_edits(store, &args, &state, global).await?;

    if args.lineage {
        util::request(store, table_metadata::get_table_lineage(&args.key), "get lineage").await?;
    }
    if args.preview {
        util::request_with_status(
            store,
            table_metadata::get_preview_data(key.preview_query()),
            "get preview",
            |s| s.table_metadata().preview.status_code,
        )
        .await?;
    }

    let state = store.state();
    let detail = state.table_metadata();
    let view = TableView {
        table: &detail.table_data,
        path: select::table_detail_path(&detail.table_data),
        owners: detail.owners.owners.values().collect(),
        tags: &detail.tags.tags,
        lineage: args.lineage.then_some(&detail.lineage.lineage),
        preview: args.preview.then_some(&detail.preview.data),
    };

    let format = global.output();
    let out = if format == OutputFormat::Table {
        render_detail(&view, &args, global)
    } else {
        output::render_single(&format, &view, |_| String::new(), |v| v.table.key.clone())
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Edits ───────────────────────────────────────────────────────────

async fn apply_edits(
    store: &Store,
    args: &TableArgs,
    state: &GlobalState,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(ref description) = args.set_description {
        util::request(
            store,
            table_metadata::update_table_description(description),
            "update description",
        )
        .await?;
        output::success(global, "Table description updated");
    }

    for assignment in &args.set_column_description {
        let (column, description) = parse_assignment(assignment)?;
        let index = column_index(&state.table_metadata().table_data, column)?;
        util::request(
            store,
            table_metadata::update_column_description(index, description),
            "update column description",
        )
        .await?;
        output::success(global, &format!("Description of '{column}' updated"));
    }

    let owner_updates: Vec<OwnerUpdate> = updates(&args.add_owner, &args.remove_owner)
        .map(|(method, id)| OwnerUpdate { method, id })
        .collect();
    if !owner_updates.is_empty() {
        util::request(
            store,
            table_metadata::update_table_owner(owner_updates),
            "update owners",
        )
        .await?;
        output::success(global, "Owners updated");
    }

    let tag_updates: Vec<TagUpdate> = updates(&args.add_tag, &args.remove_tag)
        .map(|(method, tag_name)| TagUpdate { method, tag_name })
        .collect();
    if !tag_updates.is_empty() {
        util::request(store, table_metadata::update_tags(tag_updates), "update tags").await?;
        output::success(global, "Tags updated");
    }
    Ok(())
}

/// Additions as PUTs followed by removals as DELETEs.
fn updates<'a>(
    add: &'a [String],
    remove: &'a [String],
) -> impl Iterator<Item = (UpdateMethod, String)> + 'a {
    add.iter()
        .map(|v| (UpdateMethod::Put, v.clone()))
        .chain(remove.iter().map(|v| (UpdateMethod::Delete, v.clone())))
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str), CliError> {
    assignment
        .split_once('=')
        .filter(|(column, _)| !column.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "set-column-description".into(),
            reason: format!("expected COLUMN=TEXT, got '{assignment}'"),
        })
}

fn column_index(table: &TableMetadata, column: &str) -> Result<usize, CliError> {
    table
        .columns
        .iter()
        .position(|c| c.name == column)
        .ok_or_else(|| CliError::NotFound {
            resource_type: "column".into(),
            identifier: column.into(),
        })
}

// ── Rendering ───────────────────────────────────────────────────────

fn render_detail(view: &TableView<'_>, args: &TableArgs, global: &GlobalOpts) -> String {
    let table = view.table;
    let mut out = String::new();

    let _ = writeln!(out, "{}", output::heading(global, &table.key));
    let _ = writeln!(out, "  Path:        {}", view.path);
    let _ = writeln!(
        out,
        "  Description: {}",
        table.description.as_deref().unwrap_or("(none)")
    );
    if let Some(partition) = select::partition_text(table) {
        let _ = writeln!(out, "  Partition:   {partition}");
    }
    if let Some(ts) = table.last_updated_timestamp {
        let _ = writeln!(out, "  Updated:     {}", util::format_epoch(Some(ts)));
    }
    if let Some(ref writer) = table.table_writer {
        let _ = writeln!(out, "  Writer:      {}", writer.name);
    }
    let _ = write!(out, "  Columns:     {}", table.columns.len());

    let mut sections = vec![out];

    if args.columns {
        let rows: Vec<ColumnRow> = table.columns.iter().map(ColumnRow::from).collect();
        sections.push(format!(
            "{}\n{}",
            output::heading(global, "Columns"),
            output::render_table(&rows)
        ));
    }

    if args.owners {
        let rows: Vec<UserRow> = view.owners.iter().map(|u| UserRow::from(*u)).collect();
        sections.push(format!(
            "{}\n{}",
            output::heading(global, &format!("Owners ({})", rows.len())),
            output::render_table(&rows)
        ));
    }

    if args.tags {
        let names: Vec<&str> = view.tags.iter().map(|t| t.tag_name.as_str()).collect();
        sections.push(format!(
            "{}\n{}",
            output::heading(global, &format!("Tags ({})", names.len())),
            names.join(", ")
        ));
    }

    if let Some(lineage) = view.lineage {
        for tab in select::lineage_tabs(lineage) {
            let rows: Vec<LineageRow> = tab.items.iter().map(|l| LineageRow::from(*l)).collect();
            sections.push(format!(
                "{}\n{}",
                output::heading(global, &tab.title),
                output::render_table(&rows)
            ));
        }
    }

    if let Some(preview) = view.preview {
        sections.push(format!(
            "{}\n{}",
            output::heading(global, "Preview"),
            render_preview(preview)
        ));
    }

    sections.join("\n\n")
}

fn render_preview(preview: &PreviewData) -> String {
    if let Some(ref error) = preview.error_text {
        return error.clone();
    }
    let mut builder = Builder::default();
    builder.push_record(preview.columns.iter().map(|c| c.column_name.clone()));
    for row in &preview.data {
        builder.push_record(preview.columns.iter().map(|c| {
            row.get(&c.column_name)
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default()
        }));
    }
    builder.build().with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use datadex_core::model::ColumnStat;

    use super::*;

    fn stat(stat_type: &str, stat_val: &str, start: i64, end: i64) -> ColumnStat {
        ColumnStat {
            stat_type: stat_type.into(),
            stat_val: stat_val.into(),
            start_epoch: Some(start),
            end_epoch: Some(end),
        }
    }

    #[test]
    fn column_stats_carry_their_own_period() {
        let daily = TableColumn {
            name: "order_id".into(),
            stats: vec![
                stat("count", "12000", 1_571_616_000, 1_571_616_000),
                stat("unique_values", "[]", 1_500_000_000, 1_600_000_000),
            ],
            ..TableColumn::default()
        };
        let unstated = TableColumn {
            name: "note".into(),
            ..TableColumn::default()
        };

        let row = ColumnRow::from(&daily);
        assert_eq!(
            row.stats,
            "count: 12,000\nStats reflect data collected on Oct 21, 2019 only. (daily partition)"
        );
        assert_eq!(ColumnRow::from(&unstated).stats, "");
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert!(matches!(
            parse_assignment("order_id=Primary key = unique"),
            Ok(("order_id", "Primary key = unique"))
        ));
        assert!(parse_assignment("no-separator").is_err());
        assert!(parse_assignment("=text").is_err());
    }

    #[test]
    fn additions_precede_removals() {
        let add = vec!["a".to_owned()];
        let remove = vec!["b".to_owned()];
        let all: Vec<_> = updates(&add, &remove).collect();
        assert_eq!(
            all,
            vec![
                (UpdateMethod::Put, "a".to_owned()),
                (UpdateMethod::Delete, "b".to_owned())
            ]
        );
    }
}
