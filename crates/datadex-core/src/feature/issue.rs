use crate::message::{Async, LoadState, Message, Phase};
use crate::model::{Issue, IssuesPage, NewIssue};

use super::Reducer;

/// Everything needed to file an issue and tell the table owners about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    pub key: String,
    pub title: String,
    pub description: String,
    /// `schema.table`, used in the owner notification.
    pub resource_name: String,
    /// Detail page path, used in the owner notification.
    pub resource_path: String,
}

impl CreateIssueRequest {
    pub fn new_issue(&self) -> NewIssue {
        NewIssue {
            key: self.key.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueMessage {
    /// Request carries the table key.
    GetIssues(Async<String, IssuesPage>),
    CreateIssue(Async<CreateIssueRequest, Issue>),
}

impl IssueMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetIssues(op) => op.phase(),
            Self::CreateIssue(op) => op.phase(),
        }
    }
}

pub fn get_issues(table_key: impl Into<String>) -> IssueMessage {
    IssueMessage::GetIssues(Async::Request(table_key.into()))
}

pub fn create_issue(request: CreateIssueRequest) -> IssueMessage {
    IssueMessage::CreateIssue(Async::Request(request))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueState {
    pub status: LoadState,
    pub create_status: LoadState,
    pub issues: Vec<Issue>,
    /// Open issues beyond the ones listed.
    pub remaining: u32,
    pub remaining_url: Option<String>,
}

impl Reducer for IssueState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Issue(message) = message else {
            return self;
        };
        match message {
            IssueMessage::GetIssues(Async::Request(_)) => Self {
                status: LoadState::InFlight,
                issues: Vec::new(),
                remaining: 0,
                remaining_url: None,
                ..self
            },
            IssueMessage::GetIssues(Async::Success(page)) => Self {
                status: LoadState::Complete,
                issues: page.issues.clone(),
                remaining: page.remaining,
                remaining_url: page.remaining_url.clone(),
                ..self
            },
            IssueMessage::GetIssues(Async::Failure(_)) => Self {
                status: LoadState::Error,
                issues: Vec::new(),
                remaining: 0,
                remaining_url: None,
                ..self
            },
            IssueMessage::CreateIssue(Async::Request(_)) => Self {
                create_status: LoadState::InFlight,
                ..self
            },
            IssueMessage::CreateIssue(Async::Success(issue)) => {
                let mut issues = self.issues;
                issues.retain(|existing| existing.issue_key != issue.issue_key);
                issues.insert(0, issue.clone());
                Self {
                    create_status: LoadState::Complete,
                    issues,
                    ..self
                }
            }
            IssueMessage::CreateIssue(Async::Failure(_)) => Self {
                create_status: LoadState::Error,
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

    fn issue(key: &str) -> Issue {
        Issue {
            issue_key: key.into(),
            title: format!("{key} title"),
            url: format!("https://tracker/{key}"),
            ..Issue::default()
        }
    }

    fn loaded() -> IssueState {
        IssueState {
            status: LoadState::Complete,
            issues: vec![issue("DATA-1")],
            remaining: 3,
            remaining_url: Some("https://tracker/search".into()),
            ..IssueState::default()
        }
    }

    #[test]
    fn get_request_clears_previous_table() {
        let next = loaded().reduce(&get_issues("hive://gold.core/other").into());
        assert!(next.issues.is_empty());
        assert_eq!(next.remaining, 0);
        assert_eq!(next.status, LoadState::InFlight);
    }

    #[test]
    fn get_failure_resets_page() {
        let next =
            loaded().reduce(&IssueMessage::GetIssues(Async::Failure(ErrorInfo::default())).into());
        assert_eq!(next.issues, Vec::new());
        assert_eq!(next.remaining_url, None);
        assert_eq!(next.status, LoadState::Error);
    }

    #[test]
    fn created_issue_is_prepended_once() {
        let msg: Message = IssueMessage::CreateIssue(Async::Success(issue("DATA-2"))).into();
        let once = loaded().reduce(&msg);
        let twice = once.clone().reduce(&msg);
        assert_eq!(once.issues, vec![issue("DATA-2"), issue("DATA-1")]);
        assert_eq!(once, twice);
        assert_eq!(once.create_status, LoadState::Complete);
    }

    #[test]
    fn create_failure_keeps_list() {
        let next = loaded()
            .reduce(&IssueMessage::CreateIssue(Async::Failure(ErrorInfo::default())).into());
        assert_eq!(next.issues, vec![issue("DATA-1")]);
        assert_eq!(next.create_status, LoadState::Error);
    }
}
