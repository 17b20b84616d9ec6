use std::fmt::Write as _;

use datadex_core::feature::user;
use datadex_core::{Store, User};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    store: &Store,
    id: Option<String>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (message, operation) = match id {
        Some(ref id) => (user::get_user(id), "get user"),
        None => (user::get_logged_in_user(), "get logged-in user"),
    };
    let state = util::request(store, message, operation).await?;

    let users = state.user();
    let found = if id.is_some() {
        users.profile.user.as_ref()
    } else {
        users.logged_in_user.as_ref()
    };
    let user = found.ok_or_else(|| CliError::NotFound {
        resource_type: "user".into(),
        identifier: id.clone().unwrap_or_else(|| "(logged in)".into()),
    })?;

    let out = output::render_single(&global.output(), user, detail, |u| u.user_id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(u: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", u.display_name);
    let _ = writeln!(out, "  ID:     {}", u.user_id);
    let _ = writeln!(out, "  Email:  {}", u.email);
    if let Some(ref team) = u.team_name {
        let _ = writeln!(out, "  Team:   {team}");
    }
    if let Some(ref role) = u.role_name {
        let _ = writeln!(out, "  Role:   {role}");
    }
    let _ = write!(out, "  Active: {}", if u.is_active { "yes" } else { "no" });
    out
}
