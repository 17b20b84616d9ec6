use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::model::{PreviewQuery, TableMetadata};

/// Parsed `database://cluster.schema/table` resource key.
///
/// The cluster is everything before the first `.`; schema and table may
/// themselves contain dots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub database: String,
    pub cluster: String,
    pub schema: String,
    pub table: String,
}

impl TableKey {
    /// Build a key from a loaded table's identifying fields.
    pub fn from_metadata(table: &TableMetadata) -> Self {
        Self {
            database: table.database.clone(),
            cluster: table.cluster.clone(),
            schema: table.schema.clone(),
            table: table.name.clone(),
        }
    }

    /// In-app path of the table's detail page.
    pub fn detail_path(&self) -> String {
        format!(
            "/table_detail/{}/{}/{}/{}",
            self.cluster, self.database, self.schema, self.table
        )
    }

    /// `schema.table`, the name used in notification emails.
    pub fn resource_name(&self) -> String {
        format!("{}.{}", self.schema, self.table)
    }

    pub fn preview_query(&self) -> PreviewQuery {
        PreviewQuery {
            database: self.database.clone(),
            schema: self.schema.clone(),
            table_name: self.table.clone(),
            cluster: self.cluster.clone(),
        }
    }
}

impl FromStr for TableKey {
    type Err = CoreError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidTableKey {
            key: key.to_owned(),
        };
        let (database, rest) = key.split_once("://").ok_or_else(invalid)?;
        let (cluster_schema, table) = rest.split_once('/').ok_or_else(invalid)?;
        let (cluster, schema) = cluster_schema.split_once('.').ok_or_else(invalid)?;

        if [database, cluster, schema, table]
            .iter()
            .any(|part| part.is_empty() || part.contains('/'))
        {
            return Err(invalid());
        }

        Ok(Self {
            database: database.to_owned(),
            cluster: cluster.to_owned(),
            schema: schema.to_owned(),
            table: table.to_owned(),
        })
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}.{}/{}",
            self.database, self.cluster, self.schema, self.table
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_and_displays() {
        let key: TableKey = "hive://gold.core/orders".parse().unwrap();
        assert_eq!(key.database, "hive");
        assert_eq!(key.cluster, "gold");
        assert_eq!(key.schema, "core");
        assert_eq!(key.table, "orders");
        assert_eq!(key.to_string(), "hive://gold.core/orders");
    }

    #[test]
    fn schema_may_contain_dots() {
        let key: TableKey = "bigquery://prod.project.dataset/events".parse().unwrap();
        assert_eq!(key.cluster, "prod");
        assert_eq!(key.schema, "project.dataset");
    }

    #[test]
    fn detail_path_orders_cluster_first() {
        let key: TableKey = "hive://gold.core/orders".parse().unwrap();
        assert_eq!(key.detail_path(), "/table_detail/gold/hive/core/orders");
        assert_eq!(key.resource_name(), "core.orders");
    }

    #[test]
    fn rejects_malformed_keys() {
        for bad in [
            "orders",
            "hive://gold/orders",
            "hive://.core/orders",
            "hive://gold.core/",
            "hive://gold.core/a/b",
        ] {
            assert!(
                matches!(bad.parse::<TableKey>(), Err(CoreError::InvalidTableKey { .. })),
                "accepted {bad}"
            );
        }
    }
}
