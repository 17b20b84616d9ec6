use crate::message::{Async, LoadState, Message, Phase};
use crate::model::Tag;

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum TagsMessage {
    GetAllTags(Async<(), Vec<Tag>>),
}

impl TagsMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetAllTags(op) => op.phase(),
        }
    }
}

pub fn get_all_tags() -> TagsMessage {
    TagsMessage::GetAllTags(Async::Request(()))
}

/// Every tag in the catalog (browse page), as opposed to the tags of the
/// table currently open, which live in the table metadata slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagsState {
    pub status: LoadState,
    pub all_tags: Vec<Tag>,
}

impl Reducer for TagsState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Tags(TagsMessage::GetAllTags(op)) = message else {
            return self;
        };
        match op {
            Async::Request(()) => Self {
                status: LoadState::InFlight,
                ..self
            },
            Async::Success(tags) => Self {
                status: LoadState::Complete,
                all_tags: tags.clone(),
            },
            Async::Failure(_) => Self {
                status: LoadState::Error,
                all_tags: Vec::new(),
            },
        }
    }
}
