//! Bounded-concurrency dispatch of table conversions.

use std::{fmt, sync::Arc};

use eyre::{Context, Result, bail};
use mysql2proto_config::IgnoreRules;
use mysql2proto_core::{File, TableDescriptor, TableKind};
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info};

use crate::{Emitter, SchemaSource, TableConverter, TableDefinition, TableOutcome};

/// Default number of admission slots.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Check the schema exists and has tables, then list them.
pub async fn resolve_tables<S>(source: &S, schema: &str) -> Result<Vec<TableDescriptor>>
where
    S: SchemaSource + ?Sized,
{
    if !source.schema_exists(schema).await? {
        bail!("database `{}` does not exist", schema);
    }

    let tables = source.tables(schema).await?;
    if tables.is_empty() {
        bail!("database `{}` has no tables", schema);
    }

    Ok(tables)
}

/// Why a table produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Excluded as a whole by the ignore config.
    Ignored,
    /// Views and other non-base tables.
    NotConvertible(TableKind),
    /// No columns in the catalog.
    NoColumns,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Ignored => f.write_str("ignored by config"),
            SkipReason::NotConvertible(kind) => write!(f, "{}", kind),
            SkipReason::NoColumns => f.write_str("no columns"),
        }
    }
}

/// A table that was converted.
#[derive(Debug)]
pub struct Converted {
    pub table: String,
    pub definition: TableDefinition,
    pub file: File,
}

/// Result of a completed dispatch, sorted by table name.
#[derive(Debug, Default)]
pub struct DispatchSummary {
    pub converted: Vec<Converted>,
    pub skipped: Vec<(String, SkipReason)>,
}

impl DispatchSummary {
    fn record(&mut self, outcome: TableOutcome) {
        match outcome {
            TableOutcome::Converted {
                table,
                definition,
                file,
            } => self.converted.push(Converted {
                table,
                definition,
                file,
            }),
            TableOutcome::Ignored { table } => self.skipped.push((table, SkipReason::Ignored)),
            TableOutcome::NotConvertible { table, kind } => {
                self.skipped.push((table, SkipReason::NotConvertible(kind)))
            }
            TableOutcome::NoColumns { table } => self.skipped.push((table, SkipReason::NoColumns)),
        }
    }

    fn sort(&mut self) {
        self.converted.sort_by(|a, b| a.table.cmp(&b.table));
        self.skipped.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Look up the definition produced for a table.
    pub fn definition(&self, table: &str) -> Option<&TableDefinition> {
        self.converted
            .iter()
            .find(|c| c.table == table)
            .map(|c| &c.definition)
    }
}

/// Runs one [`TableConverter`] per table, at most `capacity` at a time.
///
/// A task holds its admission slot from before the column fetch until its
/// artifact has been emitted. The first failing task fails the whole
/// dispatch.
pub struct Dispatcher<S: ?Sized, E: ?Sized> {
    source: Arc<S>,
    emitter: Arc<E>,
    capacity: usize,
}

impl<S, E> Dispatcher<S, E>
where
    S: SchemaSource + ?Sized + 'static,
    E: Emitter + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, emitter: Arc<E>) -> Self {
        Self {
            source,
            emitter,
            capacity: DEFAULT_CONCURRENCY,
        }
    }

    /// Set the number of admission slots (at least one).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub async fn run(
        &self,
        schema: &str,
        tables: Vec<TableDescriptor>,
        rules: Arc<IgnoreRules>,
    ) -> Result<DispatchSummary> {
        let slots = Arc::new(Semaphore::new(self.capacity));
        let schema: Arc<str> = Arc::from(schema);
        let mut tasks = JoinSet::new();
        let mut summary = DispatchSummary::default();

        for table in tables {
            if rules.is_table_ignored(&table.name) {
                debug!(table = %table.name, "table ignored by config");
                summary.skipped.push((table.name, SkipReason::Ignored));
                continue;
            }

            // Surface failures from finished tasks before launching more.
            while let Some(joined) = tasks.try_join_next() {
                summary.record(joined.wrap_err("table conversion task panicked")??);
            }

            let permit = Arc::clone(&slots)
                .acquire_owned()
                .await
                .wrap_err("admission slots closed")?;
            let converter = TableConverter {
                source: Arc::clone(&self.source),
                emitter: Arc::clone(&self.emitter),
                rules: Arc::clone(&rules),
                schema: Arc::clone(&schema),
            };

            tasks.spawn(async move {
                let outcome = converter.run(table).await;
                drop(permit);
                outcome
            });
        }

        debug!(outstanding = tasks.len(), "all conversions launched");
        while let Some(joined) = tasks.join_next().await {
            summary.record(joined.wrap_err("table conversion task panicked")??);
        }

        summary.sort();
        info!(
            converted = summary.converted.len(),
            skipped = summary.skipped.len(),
            "conversion finished"
        );
        Ok(summary)
    }
}
