use crate::message::{Async, ErrorInfo, LoadState, Message, Phase};
use crate::model::AnnouncementPost;

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum AnnouncementsMessage {
    GetAnnouncements(Async<(), Vec<AnnouncementPost>>),
}

impl AnnouncementsMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetAnnouncements(op) => op.phase(),
        }
    }
}

pub fn get_announcements() -> AnnouncementsMessage {
    AnnouncementsMessage::GetAnnouncements(Async::Request(()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementsState {
    pub status: LoadState,
    pub posts: Vec<AnnouncementPost>,
    pub status_code: Option<u16>,
}

impl Reducer for AnnouncementsState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Announcements(AnnouncementsMessage::GetAnnouncements(op)) = message else {
            return self;
        };
        match op {
            Async::Request(()) => Self {
                status: LoadState::InFlight,
                ..self
            },
            Async::Success(posts) => Self {
                status: LoadState::Complete,
                posts: posts.clone(),
                status_code: Some(200),
            },
            Async::Failure(ErrorInfo { status }) => Self {
                status: LoadState::Error,
                posts: Vec::new(),
                status_code: Some(status.unwrap_or(500)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::feedback;
    use pretty_assertions::assert_eq;

    fn post(title: &str) -> AnnouncementPost {
        AnnouncementPost {
            date: "Jan 01".into(),
            title: title.into(),
            html_content: "<p>hello</p>".into(),
        }
    }

    #[test]
    fn ignores_other_features() {
        let state = AnnouncementsState {
            posts: vec![post("a")],
            ..AnnouncementsState::default()
        };
        let next = state.clone().reduce(&feedback::reset_feedback().into());
        assert_eq!(next, state);
    }

    #[test]
    fn success_stores_posts() {
        let msg = AnnouncementsMessage::GetAnnouncements(Async::Success(vec![post("a")])).into();
        let next = AnnouncementsState::default().reduce(&msg);
        assert_eq!(next.status, LoadState::Complete);
        assert_eq!(next.posts, vec![post("a")]);
        assert_eq!(next.status_code, Some(200));
    }

    #[test]
    fn failure_clears_posts_and_defaults_status_code() {
        let state = AnnouncementsState {
            posts: vec![post("stale")],
            ..AnnouncementsState::default()
        };
        let msg =
            AnnouncementsMessage::GetAnnouncements(Async::Failure(ErrorInfo::default())).into();
        let next = state.reduce(&msg);
        assert_eq!(next.status, LoadState::Error);
        assert!(next.posts.is_empty());
        assert_eq!(next.status_code, Some(500));
    }
}
