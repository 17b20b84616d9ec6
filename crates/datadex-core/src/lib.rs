//! State layer between `datadex-api` and its consumers (the CLI, tests).
//!
//! This crate owns the feature state, the reducers that update it, and
//! the coordinators that talk to the catalog:
//!
//! - **[`Store`]**: Single owner of the [`GlobalState`] tree. Messages are
//!   queued and reduced one at a time in arrival order; each new snapshot
//!   is published through a `watch` channel. [`Store::wait_for()`] and
//!   [`Store::subscribe()`] let callers observe the result.
//!
//! - **[`Message`]**: Closed vocabulary of every feature message. Async
//!   operations use the [`Async`] lifecycle (`Request` → `Success` |
//!   `Failure`); builder functions in each [`feature`] module create the
//!   Request half.
//!
//! - **[`feature`]**: One module per feature slice (bookmarks, search,
//!   table metadata, ...), each with a pure [`Reducer`].
//!
//! - **[`effects`]**: Coordinators started by Request messages. They call
//!   the catalog and dispatch exactly one outcome, sometimes followed by a
//!   timed follow-up on a cancellable [`TimerSlot`](effects::TimerSlot).
//!
//! - **[`select`]**: Derived views: bookmark and lineage tabs, stat
//!   captions, truncated titles.

pub mod config;
pub mod convert;
pub mod effects;
pub mod error;
pub mod feature;
pub mod message;
pub mod model;
pub mod select;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ClientConfig, FeatureFlags, TlsVerification};
pub use error::CoreError;
pub use feature::Reducer;
pub use message::{Async, ErrorInfo, LoadState, Message, Phase, SendingState};
pub use store::{GlobalState, StateStream, StateWatchStream, Store};

pub use model::{
    AnnouncementPost, Bookmark, DashboardResource, FeedbackForm, Issue, Lineage, LineageItem,
    NotificationType, OwnerDict, PreviewData, ResourceType, SearchResults, TableColumn, TableKey,
    TableMetadata, TableResource, Tag, UpdateMethod, User,
};
