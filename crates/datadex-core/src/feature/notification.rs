use crate::message::{Async, Message, Phase, SendingState};
use crate::model::{NotificationOptions, NotificationPayload, NotificationType, TableKey};

use super::Reducer;

/// What the requester wants the owners to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMetadataType {
    TableDescription,
    ColumnDescription,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationMessage {
    SubmitNotification(Async<NotificationPayload, ()>),
    OpenRequestDialog {
        request_type: RequestMetadataType,
        column_name: Option<String>,
    },
    CloseRequestDialog,
}

impl NotificationMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::SubmitNotification(op) => op.phase(),
            Self::OpenRequestDialog { .. } | Self::CloseRequestDialog => Phase::Sync,
        }
    }
}

// ── Action creators ─────────────────────────────────────────────────

pub fn submit_notification(payload: NotificationPayload) -> NotificationMessage {
    NotificationMessage::SubmitNotification(Async::Request(payload))
}

pub fn open_request_dialog(
    request_type: RequestMetadataType,
    column_name: Option<String>,
) -> NotificationMessage {
    NotificationMessage::OpenRequestDialog {
        request_type,
        column_name,
    }
}

pub fn close_request_dialog() -> NotificationMessage {
    NotificationMessage::CloseRequestDialog
}

/// Ask a table's owners to document it.
///
/// A column request names the column ahead of the free-form comment so
/// the email is actionable on its own.
pub fn request_metadata(
    table: &TableKey,
    recipients: Vec<String>,
    sender: String,
    request_type: RequestMetadataType,
    column_name: Option<&str>,
    comment: Option<&str>,
) -> NotificationMessage {
    let comment = match (column_name, comment.filter(|c| !c.trim().is_empty())) {
        (Some(column), Some(comment)) => {
            Some(format!("Description requested for column '{column}'\n{comment}"))
        }
        (Some(column), None) => Some(format!("Description requested for column '{column}'")),
        (None, comment) => comment.map(str::to_owned),
    };

    submit_notification(NotificationPayload {
        recipients,
        sender,
        notification_type: NotificationType::Requested,
        options: NotificationOptions {
            resource_name: Some(table.resource_name()),
            resource_path: Some(table.detail_path()),
            description_requested: Some(request_type == RequestMetadataType::TableDescription),
            fields_requested: Some(request_type == RequestMetadataType::ColumnDescription),
            comment,
            data_issue_url: None,
        },
    })
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub request_is_open: bool,
    pub request_type: Option<RequestMetadataType>,
    pub column_name: Option<String>,
    pub send_state: SendingState,
}

impl Reducer for NotificationState {
    fn reduce(self, message: &Message) -> Self {
        let Message::Notification(message) = message else {
            return self;
        };
        match message {
            NotificationMessage::SubmitNotification(op) => {
                let send_state = match op {
                    Async::Request(_) => SendingState::Waiting,
                    Async::Success(()) => SendingState::Complete,
                    Async::Failure(_) => SendingState::Error,
                };
                Self {
                    request_is_open: false,
                    send_state,
                    ..self
                }
            }
            NotificationMessage::OpenRequestDialog {
                request_type,
                column_name,
            } => Self {
                request_is_open: true,
                request_type: Some(*request_type),
                column_name: column_name.clone(),
                send_state: SendingState::Idle,
            },
            NotificationMessage::CloseRequestDialog => Self::default(),
        }
    }
}
