// Table detail page state: the table itself plus its owners, tags,
// preview sample, and lineage, each tracked with its own status so the
// page can render sections independently.

use crate::message::{Async, LoadState, Message, Phase};
use crate::model::{Lineage, OwnerDict, PreviewData, PreviewQuery, Tag, TableMetadata, UpdateMethod};

use super::Reducer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRequest {
    pub key: String,
    /// Position in the search results the user came from.
    pub index: Option<String>,
    /// Page the user came from (search, browse, home).
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDataPayload {
    pub data: TableMetadata,
    pub owners: OwnerDict,
    /// Sorted alphabetically.
    pub tags: Vec<Tag>,
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescription {
    pub column_index: usize,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerUpdate {
    pub method: UpdateMethod,
    /// User id of the owner being added or removed.
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUpdate {
    pub method: UpdateMethod,
    pub tag_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewPayload {
    pub data: PreviewData,
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableMetadataMessage {
    GetTableData(Async<TableRequest, TableDataPayload>),
    GetTableDescription(Async<(), String>),
    /// Request carries the new description; Success echoes it.
    UpdateTableDescription(Async<String, String>),
    /// Request carries the column index.
    GetColumnDescription(Async<usize, ColumnDescription>),
    UpdateColumnDescription(Async<ColumnDescription, ColumnDescription>),
    /// Success carries the owners as re-read after the updates.
    UpdateTableOwner(Async<Vec<OwnerUpdate>, OwnerDict>),
    /// Success carries the tags as re-read after the updates.
    UpdateTags(Async<Vec<TagUpdate>, Vec<Tag>>),
    GetPreviewData(Async<PreviewQuery, PreviewPayload>),
    /// Request carries the table key.
    GetTableLineage(Async<String, Lineage>),
}

impl TableMetadataMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetTableData(op) => op.phase(),
            Self::GetTableDescription(op) => op.phase(),
            Self::UpdateTableDescription(op) => op.phase(),
            Self::GetColumnDescription(op) => op.phase(),
            Self::UpdateColumnDescription(op) => op.phase(),
            Self::UpdateTableOwner(op) => op.phase(),
            Self::UpdateTags(op) => op.phase(),
            Self::GetPreviewData(op) => op.phase(),
            Self::GetTableLineage(op) => op.phase(),
        }
    }
}

// ── Action creators ─────────────────────────────────────────────────

pub fn get_table_data(
    key: impl Into<String>,
    index: Option<String>,
    source: Option<String>,
) -> TableMetadataMessage {
    TableMetadataMessage::GetTableData(Async::Request(TableRequest {
        key: key.into(),
        index,
        source,
    }))
}

pub fn get_table_description() -> TableMetadataMessage {
    TableMetadataMessage::GetTableDescription(Async::Request(()))
}

pub fn update_table_description(description: impl Into<String>) -> TableMetadataMessage {
    TableMetadataMessage::UpdateTableDescription(Async::Request(description.into()))
}

pub fn get_column_description(column_index: usize) -> TableMetadataMessage {
    TableMetadataMessage::GetColumnDescription(Async::Request(column_index))
}

pub fn update_column_description(
    column_index: usize,
    description: impl Into<String>,
) -> TableMetadataMessage {
    TableMetadataMessage::UpdateColumnDescription(Async::Request(ColumnDescription {
        column_index,
        description: description.into(),
    }))
}

pub fn update_table_owner(updates: Vec<OwnerUpdate>) -> TableMetadataMessage {
    TableMetadataMessage::UpdateTableOwner(Async::Request(updates))
}

pub fn update_tags(updates: Vec<TagUpdate>) -> TableMetadataMessage {
    TableMetadataMessage::UpdateTags(Async::Request(updates))
}

pub fn get_preview_data(query: PreviewQuery) -> TableMetadataMessage {
    TableMetadataMessage::GetPreviewData(Async::Request(query))
}

pub fn get_table_lineage(key: impl Into<String>) -> TableMetadataMessage {
    TableMetadataMessage::GetTableLineage(Async::Request(key.into()))
}

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnersState {
    pub status: LoadState,
    pub owners: OwnerDict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableTagsState {
    pub status: LoadState,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewState {
    pub status: LoadState,
    pub data: PreviewData,
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineageState {
    pub status: LoadState,
    pub lineage: Lineage,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableMetadataState {
    pub status: LoadState,
    pub status_code: Option<u16>,
    pub table_data: TableMetadata,
    /// Status of the most recent description read or write.
    pub description_status: LoadState,
    pub owners: OwnersState,
    pub tags: TableTagsState,
    pub preview: PreviewState,
    pub lineage: LineageState,
}

impl TableMetadataState {
    fn with_description_status(self, description_status: LoadState) -> Self {
        Self {
            description_status,
            ..self
        }
    }

    /// An index outside the loaded columns settles as an error.
    fn with_column_description(mut self, update: &ColumnDescription) -> Self {
        let Some(column) = self.table_data.columns.get_mut(update.column_index) else {
            self.description_status = LoadState::Error;
            return self;
        };
        column.description = Some(update.description.clone());
        self.description_status = LoadState::Complete;
        self
    }
}

impl Reducer for TableMetadataState {
    #[allow(clippy::too_many_lines)]
    fn reduce(self, message: &Message) -> Self {
        use TableMetadataMessage as M;

        let Message::TableMetadata(message) = message else {
            return self;
        };
        match message {
            // ── Table data ──
            M::GetTableData(Async::Request(_)) => Self {
                status: LoadState::InFlight,
                owners: OwnersState {
                    status: LoadState::InFlight,
                    owners: OwnerDict::new(),
                },
                tags: TableTagsState {
                    status: LoadState::InFlight,
                    tags: Vec::new(),
                },
                ..Self::default()
            },
            M::GetTableData(Async::Success(payload)) => Self {
                status: LoadState::Complete,
                status_code: Some(payload.status_code),
                table_data: payload.data.clone(),
                owners: OwnersState {
                    status: LoadState::Complete,
                    owners: payload.owners.clone(),
                },
                tags: TableTagsState {
                    status: LoadState::Complete,
                    tags: payload.tags.clone(),
                },
                ..self
            },
            M::GetTableData(Async::Failure(info)) => Self {
                status: LoadState::Error,
                status_code: Some(info.status.unwrap_or(500)),
                owners: OwnersState {
                    status: LoadState::Error,
                    owners: OwnerDict::new(),
                },
                tags: TableTagsState {
                    status: LoadState::Error,
                    tags: Vec::new(),
                },
                ..Self::default()
            },

            // ── Descriptions ──
            M::GetTableDescription(Async::Request(()))
            | M::UpdateTableDescription(Async::Request(_))
            | M::GetColumnDescription(Async::Request(_))
            | M::UpdateColumnDescription(Async::Request(_)) => {
                self.with_description_status(LoadState::InFlight)
            }
            M::GetTableDescription(Async::Success(description))
            | M::UpdateTableDescription(Async::Success(description)) => {
                let mut next = self.with_description_status(LoadState::Complete);
                next.table_data.description = Some(description.clone());
                next
            }
            M::GetColumnDescription(Async::Success(update))
            | M::UpdateColumnDescription(Async::Success(update)) => {
                self.with_column_description(update)
            }
            M::GetTableDescription(Async::Failure(_))
            | M::UpdateTableDescription(Async::Failure(_))
            | M::GetColumnDescription(Async::Failure(_))
            | M::UpdateColumnDescription(Async::Failure(_)) => {
                self.with_description_status(LoadState::Error)
            }

            // ── Owners ──
            M::UpdateTableOwner(Async::Request(_)) => Self {
                owners: OwnersState {
                    status: LoadState::InFlight,
                    ..self.owners
                },
                ..self
            },
            M::UpdateTableOwner(Async::Success(owners)) => Self {
                owners: OwnersState {
                    status: LoadState::Complete,
                    owners: owners.clone(),
                },
                ..self
            },
            M::UpdateTableOwner(Async::Failure(_)) => Self {
                owners: OwnersState {
                    status: LoadState::Error,
                    ..self.owners
                },
                ..self
            },

            // ── Tags ──
            M::UpdateTags(Async::Request(_)) => Self {
                tags: TableTagsState {
                    status: LoadState::InFlight,
                    ..self.tags
                },
                ..self
            },
            M::UpdateTags(Async::Success(tags)) => Self {
                tags: TableTagsState {
                    status: LoadState::Complete,
                    tags: tags.clone(),
                },
                ..self
            },
            M::UpdateTags(Async::Failure(_)) => Self {
                tags: TableTagsState {
                    status: LoadState::Error,
                    ..self.tags
                },
                ..self
            },

            // ── Preview ──
            M::GetPreviewData(Async::Request(_)) => Self {
                preview: PreviewState {
                    status: LoadState::InFlight,
                    ..PreviewState::default()
                },
                ..self
            },
            M::GetPreviewData(Async::Success(payload)) => Self {
                preview: PreviewState {
                    status: LoadState::Complete,
                    data: payload.data.clone(),
                    status_code: Some(payload.status_code),
                },
                ..self
            },
            M::GetPreviewData(Async::Failure(info)) => Self {
                preview: PreviewState {
                    status: LoadState::Error,
                    data: PreviewData::default(),
                    status_code: Some(info.status.unwrap_or(500)),
                },
                ..self
            },

            // ── Lineage ──
            M::GetTableLineage(Async::Request(_)) => Self {
                lineage: LineageState {
                    status: LoadState::InFlight,
                    lineage: Lineage::default(),
                },
                ..self
            },
            M::GetTableLineage(Async::Success(lineage)) => Self {
                lineage: LineageState {
                    status: LoadState::Complete,
                    lineage: lineage.clone(),
                },
                ..self
            },
            M::GetTableLineage(Async::Failure(_)) => Self {
                lineage: LineageState {
                    status: LoadState::Error,
                    lineage: Lineage::default(),
                },
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorInfo;
    use crate::model::{TableColumn, User};
    use pretty_assertions::assert_eq;

    fn payload() -> TableDataPayload {
        let mut owners = OwnerDict::new();
        owners.insert(
            "ada".into(),
            User {
                user_id: "ada".into(),
                ..User::default()
            },
        );
        TableDataPayload {
            data: TableMetadata {
                key: "hive://gold.core/orders".into(),
                name: "orders".into(),
                columns: vec![
                    TableColumn {
                        name: "id".into(),
                        ..TableColumn::default()
                    },
                    TableColumn {
                        name: "amount".into(),
                        ..TableColumn::default()
                    },
                ],
                ..TableMetadata::default()
            },
            owners,
            tags: vec![Tag {
                tag_name: "finance".into(),
                tag_count: None,
            }],
            status_code: 200,
        }
    }

    fn loaded() -> TableMetadataState {
        TableMetadataState::default()
            .reduce(&TableMetadataMessage::GetTableData(Async::Success(payload())).into())
    }

    #[test]
    fn success_populates_all_sections() {
        let state = loaded();
        assert_eq!(state.status, LoadState::Complete);
        assert_eq!(state.status_code, Some(200));
        assert_eq!(state.table_data.name, "orders");
        assert!(state.owners.owners.contains_key("ada"));
        assert_eq!(state.tags.tags.len(), 1);
    }

    #[test]
    fn request_resets_previous_table() {
        let state = loaded().reduce(&get_table_data("hive://gold.core/other", None, None).into());
        assert_eq!(state.table_data, TableMetadata::default());
        assert!(state.owners.owners.is_empty());
        assert!(state.tags.tags.is_empty());
        assert_eq!(state.owners.status, LoadState::InFlight);
        assert_eq!(state.status, LoadState::InFlight);
    }

    #[test]
    fn failure_records_status_code() {
        let state = loaded().reduce(
            &TableMetadataMessage::GetTableData(Async::Failure(ErrorInfo::with_status(404))).into(),
        );
        assert_eq!(state.status_code, Some(404));
        assert_eq!(state.table_data, TableMetadata::default());

        let state = state.reduce(
            &TableMetadataMessage::GetTableData(Async::Failure(ErrorInfo::default())).into(),
        );
        assert_eq!(state.status_code, Some(500));
    }

    #[test]
    fn column_description_patches_one_column() {
        let state = loaded().reduce(
            &TableMetadataMessage::UpdateColumnDescription(Async::Success(ColumnDescription {
                column_index: 1,
                description: "Order total".into(),
            }))
            .into(),
        );
        assert_eq!(state.table_data.columns[0].description, None);
        assert_eq!(
            state.table_data.columns[1].description.as_deref(),
            Some("Order total")
        );
    }

    #[test]
    fn out_of_range_column_settles_as_error() {
        let pending = loaded().reduce(&get_column_description(9).into());
        assert_eq!(pending.description_status, LoadState::InFlight);

        let next = pending.clone().reduce(
            &TableMetadataMessage::GetColumnDescription(Async::Success(ColumnDescription {
                column_index: 9,
                description: "nope".into(),
            }))
            .into(),
        );
        assert_eq!(next.description_status, LoadState::Error);
        assert_eq!(next.table_data, pending.table_data);
    }

    #[test]
    fn owner_failure_keeps_owners() {
        let state = loaded()
            .reduce(&update_table_owner(Vec::new()).into())
            .reduce(
                &TableMetadataMessage::UpdateTableOwner(Async::Failure(ErrorInfo::default()))
                    .into(),
            );
        assert_eq!(state.owners.status, LoadState::Error);
        assert!(state.owners.owners.contains_key("ada"));
    }

    #[test]
    fn preview_failure_defaults_to_server_error() {
        let state = loaded().reduce(
            &TableMetadataMessage::GetPreviewData(Async::Failure(ErrorInfo::default())).into(),
        );
        assert_eq!(state.preview.status_code, Some(500));
        assert_eq!(state.preview.data, PreviewData::default());
    }
}
