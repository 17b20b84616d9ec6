//! Search command handlers.

use serde::Serialize;
use tabled::Tabled;

use datadex_core::feature::search;
use datadex_core::{DashboardResource, ResourceType, SearchResults, Store, TableResource, User};

use crate::cli::{GlobalOpts, OutputFormat, SearchArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
pub(super) struct TableRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&TableResource> for TableRow {
    fn from(t: &TableResource) -> Self {
        Self {
            key: t.key.clone(),
            description: t.description.clone().unwrap_or_default(),
            updated: util::format_epoch(t.last_updated_timestamp),
        }
    }
}

#[derive(Tabled)]
pub(super) struct UserRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.user_id.clone(),
            name: u.display_name.clone(),
            team: u.team_name.clone().unwrap_or_default(),
            role: u.role_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DashboardRow {
    #[tabled(rename = "URI")]
    uri: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Last Run")]
    last_run: String,
}

impl From<&DashboardResource> for DashboardRow {
    fn from(d: &DashboardResource) -> Self {
        Self {
            uri: d.uri.clone(),
            name: d.name.clone(),
            group: d.group_name.clone().unwrap_or_default(),
            last_run: util::format_epoch(d.last_successful_run_timestamp),
        }
    }
}

#[derive(Serialize)]
struct AllResults<'a> {
    search_term: &'a str,
    tables: &'a SearchResults<TableResource>,
    users: &'a SearchResults<User>,
    dashboards: &'a SearchResults<DashboardResource>,
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn handle(store: &Store, args: SearchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output();

    let Some(kind) = args.resource else {
        let state = util::request(
            store,
            search::search_all(&args.term, ResourceType::Table, args.page),
            "search",
        )
        .await?;
        let results = state.search();
        let all = AllResults {
            search_term: &results.search_term,
            tables: &results.tables,
            users: &results.users,
            dashboards: &results.dashboards,
        };
        if format != OutputFormat::Table {
            let out = output::render_single(&format, &all, |_| String::new(), |a| {
                a.tables
                    .results
                    .iter()
                    .map(|t| t.key.clone())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
            output::print_output(&out, global.quiet);
            return Ok(());
        }

        let features = store.config().features;
        let mut sections = vec![section(global, ResourceType::Table, all.tables, |t| {
            TableRow::from(t)
        })];
        if features.index_users {
            sections.push(section(global, ResourceType::User, all.users, |u| {
                UserRow::from(u)
            }));
        }
        if features.index_dashboards {
            sections.push(section(
                global,
                ResourceType::Dashboard,
                all.dashboards,
                |d| DashboardRow::from(d),
            ));
        }
        output::print_output(&sections.join("\n\n"), global.quiet);
        return Ok(());
    };

    let resource = util::resource_type(kind);
    let state = util::request(
        store,
        search::search_resource(resource, &args.term, args.page),
        "search",
    )
    .await?;
    let results = state.search();
    let out = match resource {
        ResourceType::Table => output::render_list(
            &format,
            &results.tables.results,
            |t| TableRow::from(t),
            |t| t.key.clone(),
        ),
        ResourceType::User => output::render_list(
            &format,
            &results.users.results,
            |u| UserRow::from(u),
            |u| u.user_id.clone(),
        ),
        ResourceType::Dashboard => output::render_list(
            &format,
            &results.dashboards.results,
            |d| DashboardRow::from(d),
            |d| d.uri.clone(),
        ),
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Typeahead suggestions: tables and people matching a partial term.
pub async fn suggest(store: &Store, term: String, global: &GlobalOpts) -> Result<(), CliError> {
    let state = util::request(store, search::inline_search(term), "inline search").await?;
    let inline = &state.search().inline;

    let format = global.output();
    if format != OutputFormat::Table {
        let keys: Vec<String> = inline
            .tables
            .results
            .iter()
            .map(|t| t.key.clone())
            .chain(inline.users.results.iter().map(|u| u.user_id.clone()))
            .collect();
        let out = output::render_list(
            &format,
            &keys,
            |k| SuggestionRow { key: k.clone() },
            String::clone,
        );
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let mut sections = vec![section(global, ResourceType::Table, &inline.tables, |t| {
        TableRow::from(t)
    })];
    if store.config().features.index_users {
        sections.push(section(global, ResourceType::User, &inline.users, |u| {
            UserRow::from(u)
        }));
    }
    output::print_output(&sections.join("\n\n"), global.quiet);
    Ok(())
}

#[derive(Tabled)]
struct SuggestionRow {
    #[tabled(rename = "Key")]
    key: String,
}

/// `Datasets (12)` heading followed by the page of rows.
fn section<T, R: Tabled>(
    global: &GlobalOpts,
    resource: ResourceType,
    results: &SearchResults<T>,
    to_row: impl Fn(&T) -> R,
) -> String {
    let title = format!("{} ({})", resource.display_name(), results.total_results);
    let rows: Vec<R> = results.results.iter().map(to_row).collect();
    format!(
        "{}\n{}",
        output::heading(global, &title),
        output::render_table(&rows)
    )
}
