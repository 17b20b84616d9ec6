use crate::message::{Async, LoadState, Message, Phase};
use crate::model::User;

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum UserMessage {
    GetLoggedInUser(Async<(), User>),
    GetUser(Async<String, User>),
}

impl UserMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetLoggedInUser(op) => op.phase(),
            Self::GetUser(op) => op.phase(),
        }
    }
}

pub fn get_logged_in_user() -> UserMessage {
    UserMessage::GetLoggedInUser(Async::Request(()))
}

pub fn get_user(user_id: impl Into<String>) -> UserMessage {
    UserMessage::GetUser(Async::Request(user_id.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    pub status: LoadState,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub logged_in_status: LoadState,
    pub logged_in_user: Option<User>,
    pub profile: ProfileState,
}

impl Reducer for UserState {
    fn reduce(self, message: &Message) -> Self {
        let Message::User(message) = message else {
            return self;
        };
        match message {
            UserMessage::GetLoggedInUser(Async::Request(())) => Self {
                logged_in_status: LoadState::InFlight,
                ..self
            },
            UserMessage::GetLoggedInUser(Async::Success(user)) => Self {
                logged_in_status: LoadState::Complete,
                logged_in_user: Some(user.clone()),
                ..self
            },
            // Keep whoever we last knew was logged in; a transient failure
            // should not strip the sender from pending notifications.
            UserMessage::GetLoggedInUser(Async::Failure(_)) => Self {
                logged_in_status: LoadState::Error,
                ..self
            },
            UserMessage::GetUser(Async::Request(_)) => Self {
                profile: ProfileState {
                    status: LoadState::InFlight,
                    user: None,
                },
                ..self
            },
            UserMessage::GetUser(Async::Success(user)) => Self {
                profile: ProfileState {
                    status: LoadState::Complete,
                    user: Some(user.clone()),
                },
                ..self
            },
            UserMessage::GetUser(Async::Failure(_)) => Self {
                profile: ProfileState {
                    status: LoadState::Error,
                    user: None,
                },
                ..self
            },
        }
    }
}
