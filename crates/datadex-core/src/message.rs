// ── Message vocabulary ──
//
// Every asynchronous operation is an `Async<Request, Success>` lifecycle.
// Feature enums wrap their lifecycles plus any synchronous UI messages,
// and `Message` closes the set so reducers and the effect router match
// exhaustively.

use strum::Display;

use crate::feature::announcements::AnnouncementsMessage;
use crate::feature::bookmark::BookmarkMessage;
use crate::feature::feedback::FeedbackMessage;
use crate::feature::issue::IssueMessage;
use crate::feature::last_indexed::LastIndexedMessage;
use crate::feature::notification::NotificationMessage;
use crate::feature::popular_tables::PopularTablesMessage;
use crate::feature::search::SearchMessage;
use crate::feature::table_metadata::TableMetadataMessage;
use crate::feature::tags::TagsMessage;
use crate::feature::user::UserMessage;

/// Minimal failure descriptor. Raw transport errors never enter state;
/// only the HTTP status survives, for views that distinguish "not found"
/// from "server error".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    pub status: Option<u16>,
}

impl ErrorInfo {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
        }
    }
}

/// The three phases of one asynchronous operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Async<Req, Res> {
    Request(Req),
    Success(Res),
    Failure(ErrorInfo),
}

impl<Req, Res> Async<Req, Res> {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Request(_) => Phase::Request,
            Self::Success(_) => Phase::Success,
            Self::Failure(_) => Phase::Failure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Request,
    Success,
    Failure,
    /// Synchronous messages with no lifecycle.
    Sync,
}

/// Status of a fetch-style operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    InFlight,
    Complete,
    Error,
}

impl LoadState {
    /// `true` once the last request produced either outcome.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Complete | Self::Error)
    }
}

/// Status of a submission that shows a transient confirmation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SendingState {
    #[default]
    Idle,
    Waiting,
    Complete,
    Error,
}

/// Every message the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Announcements(AnnouncementsMessage),
    Bookmark(BookmarkMessage),
    Feedback(FeedbackMessage),
    Issue(IssueMessage),
    LastIndexed(LastIndexedMessage),
    Notification(NotificationMessage),
    PopularTables(PopularTablesMessage),
    Search(SearchMessage),
    TableMetadata(TableMetadataMessage),
    Tags(TagsMessage),
    User(UserMessage),
}

impl Message {
    /// Feature slice this message belongs to, for logs.
    pub fn feature(&self) -> &'static str {
        match self {
            Self::Announcements(_) => "announcements",
            Self::Bookmark(_) => "bookmark",
            Self::Feedback(_) => "feedback",
            Self::Issue(_) => "issue",
            Self::LastIndexed(_) => "last_indexed",
            Self::Notification(_) => "notification",
            Self::PopularTables(_) => "popular_tables",
            Self::Search(_) => "search",
            Self::TableMetadata(_) => "table_metadata",
            Self::Tags(_) => "tags",
            Self::User(_) => "user",
        }
    }

    /// Lifecycle phase, or `Phase::Sync` for UI-only messages.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Announcements(m) => m.phase(),
            Self::Bookmark(m) => m.phase(),
            Self::Feedback(m) => m.phase(),
            Self::Issue(m) => m.phase(),
            Self::LastIndexed(m) => m.phase(),
            Self::Notification(m) => m.phase(),
            Self::PopularTables(m) => m.phase(),
            Self::Search(m) => m.phase(),
            Self::TableMetadata(m) => m.phase(),
            Self::Tags(m) => m.phase(),
            Self::User(m) => m.phase(),
        }
    }
}

macro_rules! impl_from_feature {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Message {
                fn from(message: $ty) -> Self {
                    Self::$variant(message)
                }
            }
        )+
    };
}

impl_from_feature!(
    Announcements(AnnouncementsMessage),
    Bookmark(BookmarkMessage),
    Feedback(FeedbackMessage),
    Issue(IssueMessage),
    LastIndexed(LastIndexedMessage),
    Notification(NotificationMessage),
    PopularTables(PopularTablesMessage),
    Search(SearchMessage),
    TableMetadata(TableMetadataMessage),
    Tags(TagsMessage),
    User(UserMessage),
);
