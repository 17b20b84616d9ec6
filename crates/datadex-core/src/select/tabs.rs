// Tabbed lists: bookmarks by resource type, lineage by direction.

use crate::config::FeatureFlags;
use crate::model::{Bookmark, Lineage, LineageItem, ResourceType};
use crate::store::GlobalState;

/// One tab of a tabbed list, borrowing its items from state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab<'a, T> {
    pub key: String,
    pub title: String,
    pub items: Vec<&'a T>,
}

/// The user's bookmarks split by resource type. People are never
/// bookmarked; dashboards only appear when they are indexed.
pub fn bookmark_tabs<'a>(
    state: &'a GlobalState,
    features: &FeatureFlags,
) -> Vec<Tab<'a, Bookmark>> {
    let bookmarks = &state.bookmarks().my_bookmarks;
    ResourceType::ALL
        .into_iter()
        .filter(|resource| match resource {
            ResourceType::Table => true,
            ResourceType::Dashboard => features.index_dashboards,
            ResourceType::User => false,
        })
        .map(|resource| {
            let items: Vec<_> = bookmarks
                .iter()
                .filter(|b| b.resource_type == resource)
                .collect();
            Tab {
                key: format!("bookmarktab:{resource}"),
                title: format!("{} ({})", resource.display_name(), items.len()),
                items,
            }
        })
        .collect()
}

pub fn lineage_tabs(lineage: &Lineage) -> [Tab<'_, LineageItem>; 2] {
    [
        counted_tab("upstream", "Upstream", &lineage.upstream_entities),
        counted_tab("downstream", "Downstream", &lineage.downstream_entities),
    ]
}

fn counted_tab<'a, T>(key: &str, label: &str, items: &'a [T]) -> Tab<'a, T> {
    Tab {
        key: key.to_owned(),
        title: format!("{label} ({})", items.len()),
        items: items.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Reducer;
    use crate::feature::bookmark::BookmarkMessage;
    use crate::message::Async;
    use pretty_assertions::assert_eq;

    fn bookmark(key: &str, resource_type: ResourceType) -> Bookmark {
        Bookmark {
            key: key.into(),
            resource_type,
            ..Bookmark::default()
        }
    }

    fn state_with(bookmarks: Vec<Bookmark>) -> GlobalState {
        GlobalState::default()
            .reduce(&BookmarkMessage::GetBookmarks(Async::Success(bookmarks)).into())
    }

    #[test]
    fn dashboards_tab_follows_feature_flag() {
        let state = state_with(vec![
            bookmark("t1", ResourceType::Table),
            bookmark("t2", ResourceType::Table),
            bookmark("d1", ResourceType::Dashboard),
        ]);

        let tabs = bookmark_tabs(&state, &FeatureFlags::default());
        let titles: Vec<_> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Datasets (2)"]);
        assert_eq!(tabs[0].key, "bookmarktab:table");

        let features = FeatureFlags {
            index_dashboards: true,
            ..FeatureFlags::default()
        };
        let tabs = bookmark_tabs(&state, &features);
        let titles: Vec<_> = tabs.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Datasets (2)", "Dashboards (1)"]);
        assert_eq!(tabs[1].items[0].key, "d1");
    }

    #[test]
    fn lineage_tabs_count_each_direction() {
        let lineage = Lineage {
            upstream_entities: vec![LineageItem::default(), LineageItem::default()],
            downstream_entities: Vec::new(),
        };
        let [up, down] = lineage_tabs(&lineage);
        assert_eq!(up.title, "Upstream (2)");
        assert_eq!(up.key, "upstream");
        assert_eq!(down.title, "Downstream (0)");
        assert!(down.items.is_empty());
    }
}
