// ── Domain model ──
//
// Wire types are re-exported from `datadex-api` unchanged; this module
// adds the few client-side shapes the reducers normalize into.

mod table_key;

use std::collections::BTreeMap;

pub use datadex_api::models::*;
pub use table_key::TableKey;

/// Table owners keyed by user id, so recipient lists and removals are
/// stable regardless of the order the service returns them in.
pub type OwnerDict = BTreeMap<String, User>;
