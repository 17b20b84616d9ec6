//! Shared helpers for command handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;

use datadex_core::message::Phase;
use datadex_core::{CoreError, GlobalState, Message, ResourceType, Store};

use crate::cli::ResourceKind;
use crate::error::CliError;

/// Slack on top of the HTTP timeout for coordinators that chain requests.
const SETTLE_SLACK: Duration = Duration::from_secs(2);

pub fn resource_type(kind: ResourceKind) -> ResourceType {
    match kind {
        ResourceKind::Table => ResourceType::Table,
        ResourceKind::User => ResourceType::User,
        ResourceKind::Dashboard => ResourceType::Dashboard,
    }
}

/// Dispatch a Request and wait for its outcome.
///
/// Returns the state as reduced with the outcome, or `RequestFailed`
/// when the coordinator settled with a Failure.
pub async fn request(
    store: &Store,
    message: impl Into<Message>,
    operation: &str,
) -> Result<Arc<GlobalState>, CliError> {
    request_with_status(store, message, operation, |_| None).await
}

/// Like [`request`], reading the HTTP status of a failure from state for
/// features that record it.
pub async fn request_with_status(
    store: &Store,
    message: impl Into<Message>,
    operation: &str,
    failure_status: impl Fn(&GlobalState) -> Option<u16>,
) -> Result<Arc<GlobalState>, CliError> {
    // Subscribe before dispatching so the outcome cannot slip past.
    let mut tap = store.messages();
    let message = message.into();
    let feature = message.feature();
    store.dispatch(message)?;

    let waited = store.config().timeout * 2 + SETTLE_SLACK;
    let outcome = tokio::time::timeout(waited, async {
        loop {
            match tap.recv().await {
                Ok(m)
                    if m.feature() == feature
                        && matches!(m.phase(), Phase::Success | Phase::Failure) =>
                {
                    return Ok(m.phase());
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => return Err(CoreError::StoreClosed),
            }
        }
    })
    .await
    .map_err(|_| CoreError::Timeout { waited })??;

    let state = store.state();
    match outcome {
        Phase::Failure => Err(CliError::RequestFailed {
            operation: operation.into(),
            status: failure_status(&state),
        }),
        _ => Ok(state),
    }
}

/// Format an epoch-seconds timestamp as a UTC date.
pub fn format_epoch(epoch: Option<i64>) -> String {
    epoch
        .and_then(|e| chrono::DateTime::<chrono::Utc>::from_timestamp(e, 0))
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}
