//! Where schema metadata comes from.

use async_trait::async_trait;
use eyre::Result;
use mysql2proto_core::{ColumnDescriptor, TableDescriptor};

/// Read access to a database's schema catalog.
///
/// Every error is treated as fatal by the caller.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Whether the schema exists.
    async fn schema_exists(&self, schema: &str) -> Result<bool>;

    /// All tables of a schema, ordered by name.
    async fn tables(&self, schema: &str) -> Result<Vec<TableDescriptor>>;

    /// All columns of a table, ordered by ordinal position.
    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>>;
}
