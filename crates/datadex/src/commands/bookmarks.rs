//! Bookmark command handlers.

use tabled::Tabled;

use datadex_core::feature::bookmark;
use datadex_core::{Bookmark, Store, select};

use crate::cli::{BookmarksArgs, BookmarksCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct BookmarkRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Bookmark> for BookmarkRow {
    fn from(b: &Bookmark) -> Self {
        Self {
            key: b.key.clone(),
            name: b.name.clone(),
            description: b.description.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    store: &Store,
    args: BookmarksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        BookmarksCommand::List { user: Some(user) } => {
            let state = util::request(
                store,
                bookmark::get_bookmarks_for_user(&user),
                "get bookmarks",
            )
            .await?;
            let out = output::render_list(
                &global.output(),
                &state.bookmarks().bookmarks_for_user,
                |b| BookmarkRow::from(b),
                |b| b.key.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BookmarksCommand::List { user: None } => {
            let state = util::request(store, bookmark::get_bookmarks(), "get bookmarks").await?;
            let format = global.output();
            if format != OutputFormat::Table {
                let out = output::render_list(
                    &format,
                    &state.bookmarks().my_bookmarks,
                    |b| BookmarkRow::from(b),
                    |b| b.key.clone(),
                );
                output::print_output(&out, global.quiet);
                return Ok(());
            }

            let features = store.config().features;
            let sections: Vec<String> = select::bookmark_tabs(&state, &features)
                .into_iter()
                .map(|tab| {
                    let rows: Vec<BookmarkRow> =
                        tab.items.iter().map(|b| BookmarkRow::from(*b)).collect();
                    format!(
                        "{}\n{}",
                        output::heading(global, &tab.title),
                        output::render_table(&rows)
                    )
                })
                .collect();
            output::print_output(&sections.join("\n\n"), global.quiet);
            Ok(())
        }

        BookmarksCommand::Add { key, resource } => {
            util::request(
                store,
                bookmark::add_bookmark(&key, util::resource_type(resource)),
                "add bookmark",
            )
            .await?;
            output::success(global, &format!("Bookmarked {key}"));
            Ok(())
        }

        BookmarksCommand::Remove { key, resource } => {
            util::request(
                store,
                bookmark::remove_bookmark(&key, util::resource_type(resource)),
                "remove bookmark",
            )
            .await?;
            output::success(global, &format!("Removed bookmark {key}"));
            Ok(())
        }
    }
}
