use crate::message::{Async, LoadState, Message, Phase};

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum LastIndexedMessage {
    /// Success carries epoch seconds.
    GetLastIndexed(Async<(), i64>),
}

impl LastIndexedMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetLastIndexed(op) => op.phase(),
        }
    }
}

pub fn get_last_indexed() -> LastIndexedMessage {
    LastIndexedMessage::GetLastIndexed(Async::Request(()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LastIndexedState {
    pub status: LoadState,
    pub last_indexed: Option<i64>,
}

impl Reducer for LastIndexedState {
    fn reduce(self, message: &Message) -> Self {
        let Message::LastIndexed(LastIndexedMessage::GetLastIndexed(op)) = message else {
            return self;
        };
        match op {
            Async::Request(()) => Self {
                status: LoadState::InFlight,
                last_indexed: None,
            },
            Async::Success(epoch) => Self {
                status: LoadState::Complete,
                last_indexed: Some(*epoch),
            },
            Async::Failure(_) => Self {
                status: LoadState::Error,
                last_indexed: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorInfo;

    #[test]
    fn request_and_failure_clear_timestamp() {
        let loaded = LastIndexedState {
            status: LoadState::Complete,
            last_indexed: Some(1_600_000_000),
        };
        assert_eq!(loaded.reduce(&get_last_indexed().into()).last_indexed, None);

        let failed = loaded.reduce(
            &LastIndexedMessage::GetLastIndexed(Async::Failure(ErrorInfo::default())).into(),
        );
        assert_eq!(failed.last_indexed, None);
        assert_eq!(failed.status, LoadState::Error);
    }

    #[test]
    fn success_is_idempotent() {
        let msg: Message = LastIndexedMessage::GetLastIndexed(Async::Success(42)).into();
        let once = LastIndexedState::default().reduce(&msg);
        assert_eq!(once.reduce(&msg), once);
        assert_eq!(once.last_indexed, Some(42));
    }
}
