use crate::message::{Async, LoadState, Message, Phase};
use crate::model::{
    DashboardResource, ResourceType, SearchAllResults, SearchResults, TableResource, User,
};

use super::Reducer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchAllRequest {
    pub term: String,
    /// Tab that stays selected; `page_index` applies to it.
    pub resource: ResourceType,
    pub page_index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResourceRequest {
    pub resource: ResourceType,
    pub term: String,
    pub page_index: u32,
}

/// One page of results for a single resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceResults {
    Tables(SearchResults<TableResource>),
    Users(SearchResults<User>),
    Dashboards(SearchResults<DashboardResource>),
}

/// Typeahead results shown under the search bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineResults {
    pub search_term: String,
    pub tables: SearchResults<TableResource>,
    pub users: SearchResults<User>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchMessage {
    SearchAll(Async<SearchAllRequest, SearchAllResults>),
    SearchResource(Async<SearchResourceRequest, ResourceResults>),
    /// Keystroke in the search bar; debounced before any request goes out.
    InlineSearchInput {
        term: String,
    },
    /// Request carries the settled search term.
    InlineSearch(Async<String, InlineResults>),
    /// Promote the typeahead results to the main results page.
    SelectInlineResult {
        resource: ResourceType,
        term: String,
    },
    ClearSearch,
    SetResource(ResourceType),
}

impl SearchMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::SearchAll(op) => op.phase(),
            Self::SearchResource(op) => op.phase(),
            Self::InlineSearch(op) => op.phase(),
            Self::InlineSearchInput { .. }
            | Self::SelectInlineResult { .. }
            | Self::ClearSearch
            | Self::SetResource(_) => Phase::Sync,
        }
    }
}

// ── Action creators ─────────────────────────────────────────────────

pub fn search_all(
    term: impl Into<String>,
    resource: ResourceType,
    page_index: u32,
) -> SearchMessage {
    SearchMessage::SearchAll(Async::Request(SearchAllRequest {
        term: term.into(),
        resource,
        page_index,
    }))
}

pub fn search_resource(
    resource: ResourceType,
    term: impl Into<String>,
    page_index: u32,
) -> SearchMessage {
    SearchMessage::SearchResource(Async::Request(SearchResourceRequest {
        resource,
        term: term.into(),
        page_index,
    }))
}

pub fn inline_search_input(term: impl Into<String>) -> SearchMessage {
    SearchMessage::InlineSearchInput { term: term.into() }
}

pub fn inline_search(term: impl Into<String>) -> SearchMessage {
    SearchMessage::InlineSearch(Async::Request(term.into()))
}

pub fn select_inline_result(resource: ResourceType, term: impl Into<String>) -> SearchMessage {
    SearchMessage::SelectInlineResult {
        resource,
        term: term.into(),
    }
}

pub fn clear_search() -> SearchMessage {
    SearchMessage::ClearSearch
}

pub fn set_resource(resource: ResourceType) -> SearchMessage {
    SearchMessage::SetResource(resource)
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineState {
    pub status: LoadState,
    pub term: String,
    pub tables: SearchResults<TableResource>,
    pub users: SearchResults<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub status: LoadState,
    pub search_term: String,
    pub selected_tab: ResourceType,
    pub tables: SearchResults<TableResource>,
    pub users: SearchResults<User>,
    pub dashboards: SearchResults<DashboardResource>,
    pub inline: InlineState,
}

impl SearchState {
    /// Drop all main results, keeping the term, tab, and typeahead.
    fn cleared(self, status: LoadState) -> Self {
        Self {
            status,
            tables: SearchResults::default(),
            users: SearchResults::default(),
            dashboards: SearchResults::default(),
            ..self
        }
    }

    /// Total hits for one resource type on the current results page.
    pub fn total_for(&self, resource: ResourceType) -> u32 {
        match resource {
            ResourceType::Table => self.tables.total_results,
            ResourceType::User => self.users.total_results,
            ResourceType::Dashboard => self.dashboards.total_results,
        }
    }
}

impl Reducer for SearchState {
    #[allow(clippy::too_many_lines)]
    fn reduce(self, message: &Message) -> Self {
        let Message::Search(message) = message else {
            return self;
        };
        match message {
            SearchMessage::SearchAll(Async::Request(request)) => Self {
                search_term: request.term.clone(),
                selected_tab: request.resource,
                ..self.cleared(LoadState::InFlight)
            },
            SearchMessage::SearchAll(Async::Success(results)) => Self {
                status: LoadState::Complete,
                search_term: results.search_term.clone(),
                tables: results.tables.clone(),
                users: results.users.clone(),
                dashboards: results.dashboards.clone(),
                ..self
            },
            SearchMessage::SearchAll(Async::Failure(_))
            | SearchMessage::SearchResource(Async::Failure(_)) => self.cleared(LoadState::Error),

            SearchMessage::SearchResource(Async::Request(request)) => Self {
                status: LoadState::InFlight,
                search_term: request.term.clone(),
                selected_tab: request.resource,
                ..self
            },
            SearchMessage::SearchResource(Async::Success(results)) => {
                let mut next = Self {
                    status: LoadState::Complete,
                    ..self
                };
                match results {
                    ResourceResults::Tables(tables) => next.tables = tables.clone(),
                    ResourceResults::Users(users) => next.users = users.clone(),
                    ResourceResults::Dashboards(dashboards) => {
                        next.dashboards = dashboards.clone();
                    }
                }
                next
            }

            SearchMessage::InlineSearchInput { term } => Self {
                inline: InlineState {
                    status: LoadState::InFlight,
                    term: term.clone(),
                    ..self.inline
                },
                ..self
            },
            SearchMessage::InlineSearch(Async::Request(term)) => Self {
                inline: InlineState {
                    status: LoadState::InFlight,
                    term: term.clone(),
                    ..self.inline
                },
                ..self
            },
            // Results for a term the user has already typed past are stale.
            SearchMessage::InlineSearch(Async::Success(results))
                if results.search_term != self.inline.term =>
            {
                self
            }
            SearchMessage::InlineSearch(Async::Success(results)) => Self {
                inline: InlineState {
                    status: LoadState::Complete,
                    term: results.search_term.clone(),
                    tables: results.tables.clone(),
                    users: results.users.clone(),
                },
                ..self
            },
            SearchMessage::InlineSearch(Async::Failure(_)) => Self {
                inline: InlineState {
                    status: LoadState::Error,
                    term: self.inline.term.clone(),
                    ..InlineState::default()
                },
                ..self
            },
            SearchMessage::SelectInlineResult { resource, term } => Self {
                status: LoadState::Complete,
                search_term: term.clone(),
                selected_tab: *resource,
                tables: self.inline.tables.clone(),
                users: self.inline.users.clone(),
                dashboards: SearchResults::default(),
                inline: self.inline,
            },

            SearchMessage::ClearSearch => Self::default(),
            SearchMessage::SetResource(resource) => Self {
                selected_tab: *resource,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorInfo;
    use pretty_assertions::assert_eq;

    fn tables(names: &[&str]) -> SearchResults<TableResource> {
        SearchResults {
            page_index: 0,
            total_results: u32::try_from(names.len()).unwrap_or(u32::MAX),
            results: names
                .iter()
                .map(|n| TableResource {
                    key: format!("hive://gold.core/{n}"),
                    name: (*n).into(),
                    ..TableResource::default()
                })
                .collect(),
        }
    }

    fn with_results() -> SearchState {
        SearchState {
            status: LoadState::Complete,
            search_term: "orders".into(),
            tables: tables(&["orders"]),
            ..SearchState::default()
        }
    }

    #[test]
    fn search_all_request_resets_results_and_sets_term() {
        let next = with_results().reduce(&search_all("users", ResourceType::User, 0).into());
        assert_eq!(next.search_term, "users");
        assert_eq!(next.selected_tab, ResourceType::User);
        assert_eq!(next.tables, SearchResults::default());
        assert_eq!(next.status, LoadState::InFlight);
    }

    #[test]
    fn search_all_failure_leaves_empty_results() {
        let next = with_results()
            .reduce(&SearchMessage::SearchAll(Async::Failure(ErrorInfo::default())).into());
        assert!(next.tables.results.is_empty());
        assert_eq!(next.status, LoadState::Error);
        assert_eq!(next.search_term, "orders");
    }

    #[test]
    fn resource_success_only_touches_its_resource() {
        let mut state = with_results();
        state.users.total_results = 7;
        let msg = SearchMessage::SearchResource(Async::Success(ResourceResults::Tables(tables(&[
            "a", "b",
        ]))))
        .into();
        let next = state.reduce(&msg);
        assert_eq!(next.tables.total_results, 2);
        assert_eq!(next.users.total_results, 7);
    }

    #[test]
    fn stale_inline_results_are_dropped() {
        let state = SearchState::default().reduce(&inline_search_input("ord").into());
        let stale = SearchMessage::InlineSearch(Async::Success(InlineResults {
            search_term: "or".into(),
            tables: tables(&["orders"]),
            users: SearchResults::default(),
        }))
        .into();
        let next = state.clone().reduce(&stale);
        assert_eq!(next, state);
    }

    #[test]
    fn select_inline_result_promotes_typeahead() {
        let state = SearchState::default()
            .reduce(&inline_search("ord").into())
            .reduce(
                &SearchMessage::InlineSearch(Async::Success(InlineResults {
                    search_term: "ord".into(),
                    tables: tables(&["orders"]),
                    users: SearchResults::default(),
                }))
                .into(),
            )
            .reduce(&select_inline_result(ResourceType::Table, "ord").into());
        assert_eq!(state.search_term, "ord");
        assert_eq!(state.tables, tables(&["orders"]));
        assert_eq!(state.status, LoadState::Complete);
    }

    #[test]
    fn clear_search_returns_to_initial() {
        let next = with_results().reduce(&clear_search().into());
        assert_eq!(next, SearchState::default());
    }
}
