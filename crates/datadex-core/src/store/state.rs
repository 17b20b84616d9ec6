// ── Root state tree ──
//
// Composes every feature slice. Slices are reachable only through
// accessors; the store's reducer loop is the sole writer.

use crate::feature::Reducer;
use crate::feature::announcements::AnnouncementsState;
use crate::feature::bookmark::BookmarkState;
use crate::feature::feedback::FeedbackState;
use crate::feature::issue::IssueState;
use crate::feature::last_indexed::LastIndexedState;
use crate::feature::notification::NotificationState;
use crate::feature::popular_tables::PopularTablesState;
use crate::feature::search::SearchState;
use crate::feature::table_metadata::TableMetadataState;
use crate::feature::tags::TagsState;
use crate::feature::user::UserState;
use crate::message::Message;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalState {
    announcements: AnnouncementsState,
    bookmarks: BookmarkState,
    feedback: FeedbackState,
    issues: IssueState,
    last_indexed: LastIndexedState,
    notification: NotificationState,
    popular_tables: PopularTablesState,
    search: SearchState,
    table_metadata: TableMetadataState,
    tags: TagsState,
    user: UserState,
}

impl GlobalState {
    pub fn announcements(&self) -> &AnnouncementsState {
        &self.announcements
    }

    pub fn bookmarks(&self) -> &BookmarkState {
        &self.bookmarks
    }

    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    pub fn issues(&self) -> &IssueState {
        &self.issues
    }

    pub fn last_indexed(&self) -> &LastIndexedState {
        &self.last_indexed
    }

    pub fn notification(&self) -> &NotificationState {
        &self.notification
    }

    pub fn popular_tables(&self) -> &PopularTablesState {
        &self.popular_tables
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn table_metadata(&self) -> &TableMetadataState {
        &self.table_metadata
    }

    pub fn tags(&self) -> &TagsState {
        &self.tags
    }

    pub fn user(&self) -> &UserState {
        &self.user
    }
}

impl Reducer for GlobalState {
    fn reduce(self, message: &Message) -> Self {
        Self {
            announcements: self.announcements.reduce(message),
            bookmarks: self.bookmarks.reduce(message),
            feedback: self.feedback.reduce(message),
            issues: self.issues.reduce(message),
            last_indexed: self.last_indexed.reduce(message),
            notification: self.notification.reduce(message),
            popular_tables: self.popular_tables.reduce(message),
            search: self.search.reduce(message),
            table_metadata: self.table_metadata.reduce(message),
            tags: self.tags.reduce(message),
            user: self.user.reduce(message),
        }
    }
}
