//! Test utilities for the conversion pipeline.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    collections::{BTreeMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use eyre::{Result, eyre};
use mysql2proto_core::{ColumnDescriptor, TableDescriptor};

use crate::SchemaSource;

/// In-memory schema catalog for a single schema.
///
/// Records how many column fetches run at the same time.
#[derive(Debug, Default)]
pub struct MemorySource {
    schema: String,
    tables: BTreeMap<String, (TableDescriptor, Vec<ColumnDescriptor>)>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            ..Default::default()
        }
    }

    /// Add a table with `(name, data_type)` columns in ordinal order.
    pub fn table(mut self, table: TableDescriptor, columns: &[(&str, &str)]) -> Self {
        let columns = columns
            .iter()
            .zip(1..)
            .map(|((name, data_type), ordinal)| {
                ColumnDescriptor::new(&table.name, *name, ordinal, *data_type)
            })
            .collect();
        self.tables.insert(table.name.clone(), (table, columns));
        self
    }

    /// Make column fetches for `table` fail.
    pub fn failing(mut self, table: impl Into<String>) -> Self {
        self.failing.insert(table.into());
        self
    }

    /// Hold each column fetch for `delay`.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Highest number of column fetches observed at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Total number of column fetches.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaSource for MemorySource {
    async fn schema_exists(&self, schema: &str) -> Result<bool> {
        Ok(schema == self.schema)
    }

    async fn tables(&self, schema: &str) -> Result<Vec<TableDescriptor>> {
        if schema != self.schema {
            return Ok(Vec::new());
        }
        Ok(self.tables.values().map(|(t, _)| t.clone()).collect())
    }

    async fn columns(&self, schema: &str, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(table) {
            return Err(eyre!("lost connection while reading `{}`", table));
        }
        if schema != self.schema {
            return Ok(Vec::new());
        }
        Ok(self
            .tables
            .get(table)
            .map(|(_, columns)| columns.clone())
            .unwrap_or_default())
    }
}
