use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::debug;

use datadex_api::{CatalogClient, Error};

use crate::config::FeatureFlags;
use crate::feature::search::{
    InlineResults, ResourceResults, SearchAllRequest, SearchMessage, SearchResourceRequest,
    inline_search,
};
use crate::message::Async;
use crate::model::{ResourceType, SearchAllQuery, SearchResults};

use super::{EffectContext, TimerSlot, settle};

pub(super) fn route(
    ctx: &EffectContext,
    message: &SearchMessage,
) -> Option<BoxFuture<'static, ()>> {
    match message {
        SearchMessage::SearchAll(Async::Request(request)) => {
            let ctx = ctx.clone();
            let query = search_all_query(request, ctx.config.features);
            Some(
                async move {
                    let result = ctx.api.search_all(&query).await;
                    ctx.dispatch(SearchMessage::SearchAll(settle(result, "search_all")));
                }
                .boxed(),
            )
        }
        SearchMessage::SearchResource(Async::Request(request)) => {
            let ctx = ctx.clone();
            let request = request.clone();
            Some(
                async move {
                    let result = search_resource(&ctx.api, &request).await;
                    ctx.dispatch(SearchMessage::SearchResource(settle(
                        result,
                        "search_resource",
                    )));
                }
                .boxed(),
            )
        }
        SearchMessage::InlineSearchInput { term } => {
            let ctx = ctx.clone();
            let term = term.clone();
            Some(
                async move {
                    let delay = ctx.config.inline_search_debounce;
                    if ctx.timers.sleep(TimerSlot::InlineSearch, delay).await {
                        ctx.dispatch(inline_search(term));
                    } else {
                        debug!(term, "inline search superseded");
                    }
                }
                .boxed(),
            )
        }
        SearchMessage::InlineSearch(Async::Request(term)) => {
            let ctx = ctx.clone();
            let term = term.clone();
            Some(
                async move {
                    let result = inline_results(&ctx, term).await;
                    ctx.dispatch(SearchMessage::InlineSearch(settle(result, "inline_search")));
                }
                .boxed(),
            )
        }
        // Leaving search abandons any typeahead still waiting to fire.
        SearchMessage::ClearSearch => {
            ctx.timers.cancel(TimerSlot::InlineSearch);
            None
        }
        _ => None,
    }
}

fn search_all_query(request: &SearchAllRequest, features: FeatureFlags) -> SearchAllQuery {
    let page = |resource| {
        if request.resource == resource {
            request.page_index
        } else {
            0
        }
    };
    SearchAllQuery {
        term: request.term.clone(),
        table_index: page(ResourceType::Table),
        user_index: page(ResourceType::User),
        dashboard_index: page(ResourceType::Dashboard),
        include_users: features.index_users,
        include_dashboards: features.index_dashboards,
    }
}

async fn search_resource(
    api: &CatalogClient,
    request: &SearchResourceRequest,
) -> Result<ResourceResults, Error> {
    let term = request.term.as_str();
    let page = request.page_index;
    Ok(match request.resource {
        ResourceType::Table => ResourceResults::Tables(api.search_tables(term, page).await?),
        ResourceType::User => ResourceResults::Users(api.search_users(term, page).await?),
        ResourceType::Dashboard => {
            ResourceResults::Dashboards(api.search_dashboards(term, page).await?)
        }
    })
}

async fn inline_results(ctx: &EffectContext, term: String) -> Result<InlineResults, Error> {
    let include_users = ctx.config.features.index_users;
    let (tables, users) = tokio::try_join!(ctx.api.search_tables(&term, 0), async {
        if include_users {
            ctx.api.search_users(&term, 0).await
        } else {
            Ok(SearchResults::default())
        }
    })?;
    Ok(InlineResults {
        search_term: term,
        tables,
        users,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_index_applies_to_selected_resource_only() {
        let request = SearchAllRequest {
            term: "orders".into(),
            resource: ResourceType::User,
            page_index: 3,
        };
        let query = search_all_query(&request, FeatureFlags::default());
        assert_eq!(
            query,
            SearchAllQuery {
                term: "orders".into(),
                table_index: 0,
                user_index: 3,
                dashboard_index: 0,
                include_users: true,
                include_dashboards: false,
            }
        );
    }

    #[test]
    fn dashboards_follow_the_feature_flag() {
        let request = SearchAllRequest {
            term: "kpi".into(),
            resource: ResourceType::Dashboard,
            page_index: 1,
        };
        let features = FeatureFlags {
            index_dashboards: true,
            index_users: false,
            ..FeatureFlags::default()
        };
        let query = search_all_query(&request, features);
        assert!(query.include_dashboards);
        assert!(!query.include_users);
        assert_eq!(query.dashboard_index, 1);
    }
}
