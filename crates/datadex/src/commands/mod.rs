//! Command dispatch: bridges CLI args -> store messages -> output formatting.

pub mod bookmarks;
pub mod config_cmd;
pub mod feedback;
pub mod home;
pub mod issues;
pub mod request_metadata;
pub mod search;
pub mod table;
pub mod user;
pub mod util;

use datadex_core::Store;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a catalog-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Search(args) => search::handle(store, args, global).await,
        Command::Suggest { term } => search::suggest(store, term, global).await,
        Command::Popular => home::popular(store, global).await,
        Command::Table(args) => table::handle(store, args, global).await,
        Command::Bookmarks(args) => bookmarks::handle(store, args, global).await,
        Command::Issues(args) => issues::handle(store, args, global).await,
        Command::Feedback(args) => feedback::handle(store, args, global).await,
        Command::Announcements => home::announcements(store, global).await,
        Command::LastIndexed => home::last_indexed(store, global).await,
        Command::Tags => home::tags(store, global).await,
        Command::RequestMetadata(args) => request_metadata::handle(store, args, global).await,
        Command::User { id } => user::handle(store, id, global).await,
        // Config and Completions are handled before a store is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
