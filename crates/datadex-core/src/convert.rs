// ── Response normalization ──
//
// Shapes API results into the form the reducers store: owners keyed by
// id, tags in display order, errors collapsed to a status code.

use crate::feature::table_metadata::TableDataPayload;
use crate::message::ErrorInfo;
use crate::model::{OwnerDict, TableDataResponse, Tag, User};

impl From<&datadex_api::Error> for ErrorInfo {
    fn from(err: &datadex_api::Error) -> Self {
        Self {
            status: err.status(),
        }
    }
}

/// Stable identifier for a user: id, then email, then display name.
pub fn user_key(user: &User) -> &str {
    [&user.user_id, &user.email, &user.display_name]
        .into_iter()
        .find(|s| !s.is_empty())
        .map_or("", String::as_str)
}

pub fn owner_dict(owners: Vec<User>) -> OwnerDict {
    owners
        .into_iter()
        .map(|user| (user_key(&user).to_owned(), user))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Alphabetical, case-insensitive, with a case-sensitive tiebreak so the
/// order is total.
pub fn sort_tags(mut tags: Vec<Tag>) -> Vec<Tag> {
    tags.sort_by(|a, b| {
        a.tag_name
            .to_lowercase()
            .cmp(&b.tag_name.to_lowercase())
            .then_with(|| a.tag_name.cmp(&b.tag_name))
    });
    tags
}

pub fn table_payload(resp: TableDataResponse) -> TableDataPayload {
    TableDataPayload {
        data: resp.table,
        owners: owner_dict(resp.owners),
        tags: sort_tags(resp.tags),
        status_code: 200,
    }
}
