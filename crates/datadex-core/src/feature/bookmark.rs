use crate::message::{Async, LoadState, Message, Phase};
use crate::model::{Bookmark, ResourceType};

use super::Reducer;

/// Identifies one bookmarked resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookmarkRef {
    pub key: String,
    pub resource_type: ResourceType,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkMessage {
    /// Success carries the refreshed bookmark list.
    AddBookmark(Async<BookmarkRef, Vec<Bookmark>>),
    /// Success echoes the removed reference.
    RemoveBookmark(Async<BookmarkRef, BookmarkRef>),
    GetBookmarks(Async<(), Vec<Bookmark>>),
    /// Bookmarks of another user (profile pages).
    GetBookmarksForUser(Async<String, Vec<Bookmark>>),
}

impl BookmarkMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::AddBookmark(op) => op.phase(),
            Self::RemoveBookmark(op) => op.phase(),
            Self::GetBookmarks(op) => op.phase(),
            Self::GetBookmarksForUser(op) => op.phase(),
        }
    }
}

// ── Action creators ─────────────────────────────────────────────────

pub fn add_bookmark(key: impl Into<String>, resource_type: ResourceType) -> BookmarkMessage {
    BookmarkMessage::AddBookmark(Async::Request(BookmarkRef {
        key: key.into(),
        resource_type,
    }))
}

pub fn remove_bookmark(key: impl Into<String>, resource_type: ResourceType) -> BookmarkMessage {
    BookmarkMessage::RemoveBookmark(Async::Request(BookmarkRef {
        key: key.into(),
        resource_type,
    }))
}

pub fn get_bookmarks() -> BookmarkMessage {
    BookmarkMessage::GetBookmarks(Async::Request(()))
}

pub fn get_bookmarks_for_user(user_id: impl Into<String>) -> BookmarkMessage {
    BookmarkMessage::GetBookmarksForUser(Async::Request(user_id.into()))
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkState {
    pub status: LoadState,
    pub my_bookmarks: Vec<Bookmark>,
    pub my_bookmarks_is_loaded: bool,
    pub bookmarks_for_user: Vec<Bookmark>,
}

impl BookmarkState {
    fn loaded(self, bookmarks: &[Bookmark]) -> Self {
        Self {
            status: LoadState::Complete,
            my_bookmarks: bookmarks.to_vec(),
            my_bookmarks_is_loaded: true,
            ..self
        }
    }
}

// Failures keep the cached lists: a failed add/remove must not make the
// user's existing bookmarks disappear from view.
impl Reducer for BookmarkState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Bookmark(message) = message else {
            return self;
        };
        match message {
            BookmarkMessage::AddBookmark(Async::Success(bookmarks))
            | BookmarkMessage::GetBookmarks(Async::Success(bookmarks)) => self.loaded(bookmarks),

            BookmarkMessage::RemoveBookmark(Async::Success(removed)) => {
                let mut my_bookmarks = self.my_bookmarks;
                my_bookmarks.retain(|b| b.key != removed.key);
                Self {
                    status: LoadState::Complete,
                    my_bookmarks,
                    ..self
                }
            }

            BookmarkMessage::GetBookmarksForUser(Async::Request(_)) => Self {
                status: LoadState::InFlight,
                bookmarks_for_user: Vec::new(),
                ..self
            },
            BookmarkMessage::GetBookmarksForUser(Async::Success(bookmarks)) => Self {
                status: LoadState::Complete,
                bookmarks_for_user: bookmarks.clone(),
                ..self
            },

            BookmarkMessage::AddBookmark(Async::Request(_))
            | BookmarkMessage::RemoveBookmark(Async::Request(_))
            | BookmarkMessage::GetBookmarks(Async::Request(())) => Self {
                status: LoadState::InFlight,
                ..self
            },

            BookmarkMessage::AddBookmark(Async::Failure(_))
            | BookmarkMessage::RemoveBookmark(Async::Failure(_))
            | BookmarkMessage::GetBookmarks(Async::Failure(_))
            | BookmarkMessage::GetBookmarksForUser(Async::Failure(_)) => Self {
                status: LoadState::Error,
                ..self
            },
        }
    }
}
