use crate::message::{Async, Message, Phase, SendingState};
use crate::model::FeedbackForm;

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackMessage {
    SubmitFeedback(Async<FeedbackForm, ()>),
    /// Returns the form to idle once the confirmation has been shown.
    ResetFeedback,
}

impl FeedbackMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::SubmitFeedback(op) => op.phase(),
            Self::ResetFeedback => Phase::Sync,
        }
    }
}

pub fn submit_feedback(form: FeedbackForm) -> FeedbackMessage {
    FeedbackMessage::SubmitFeedback(Async::Request(form))
}

pub fn reset_feedback() -> FeedbackMessage {
    FeedbackMessage::ResetFeedback
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedbackState {
    pub send_state: SendingState,
}

impl Reducer for FeedbackState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Feedback(message) = message else {
            return self;
        };
        let send_state = match message {
            FeedbackMessage::SubmitFeedback(Async::Request(_)) => SendingState::Waiting,
            FeedbackMessage::SubmitFeedback(Async::Success(())) => SendingState::Complete,
            FeedbackMessage::SubmitFeedback(Async::Failure(_)) => SendingState::Error,
            FeedbackMessage::ResetFeedback => SendingState::Idle,
        };
        Self { send_state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorInfo;

    fn rating() -> FeedbackForm {
        FeedbackForm::Rating {
            rating: 8,
            comment: String::new(),
        }
    }

    #[test]
    fn submit_walks_waiting_complete_idle() {
        let state = FeedbackState::default()
            .reduce(&submit_feedback(rating()).into());
        assert_eq!(state.send_state, SendingState::Waiting);

        let state = state.reduce(&FeedbackMessage::SubmitFeedback(Async::Success(())).into());
        assert_eq!(state.send_state, SendingState::Complete);

        let state = state.reduce(&reset_feedback().into());
        assert_eq!(state.send_state, SendingState::Idle);
    }

    #[test]
    fn failure_sets_error() {
        let state = FeedbackState {
            send_state: SendingState::Waiting,
        }
        .reduce(&FeedbackMessage::SubmitFeedback(Async::Failure(ErrorInfo::default())).into());
        assert_eq!(state.send_state, SendingState::Error);
    }
}
