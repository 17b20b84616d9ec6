use crate::message::{Async, LoadState, Message, Phase};
use crate::model::TableResource;

use super::Reducer;

#[derive(Debug, Clone, PartialEq)]
pub enum PopularTablesMessage {
    GetPopularTables(Async<(), Vec<TableResource>>),
}

impl PopularTablesMessage {
    pub fn phase(&self) -> Phase {
        match self {
            Self::GetPopularTables(op) => op.phase(),
        }
    }
}

pub fn get_popular_tables() -> PopularTablesMessage {
    PopularTablesMessage::GetPopularTables(Async::Request(()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopularTablesState {
    pub status: LoadState,
    pub tables: Vec<TableResource>,
}

impl Reducer for PopularTablesState {
    fn reduce(self, message: &Message) -> Self {
        let Message::PopularTables(PopularTablesMessage::GetPopularTables(op)) = message else {
            return self;
        };
        match op {
            Async::Request(()) => Self {
                status: LoadState::InFlight,
                ..self
            },
            Async::Success(tables) => Self {
                status: LoadState::Complete,
                tables: tables.clone(),
            },
            Async::Failure(_) => Self {
                status: LoadState::Error,
                tables: Vec::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ErrorInfo;
    use pretty_assertions::assert_eq;

    fn table(name: &str) -> TableResource {
        TableResource {
            key: format!("hive://gold.core/{name}"),
            name: name.into(),
            ..TableResource::default()
        }
    }

    #[test]
    fn success_replaces_tables() {
        let msg =
            PopularTablesMessage::GetPopularTables(Async::Success(vec![table("orders")])).into();
        let next = PopularTablesState::default().reduce(&msg);
        assert_eq!(next.tables, vec![table("orders")]);
        assert_eq!(next.status, LoadState::Complete);
    }

    #[test]
    fn failure_discards_stale_tables() {
        let state = PopularTablesState {
            status: LoadState::Complete,
            tables: vec![table("stale")],
        };
        let msg =
            PopularTablesMessage::GetPopularTables(Async::Failure(ErrorInfo::default())).into();
        let next = state.reduce(&msg);
        assert!(next.tables.is_empty());
        assert_eq!(next.status, LoadState::Error);
    }
}
