//! Per-table conversion.

use std::sync::Arc;

use eyre::{Context, Result};
use mysql2proto_config::{IgnoreRule, IgnoreRules};
use mysql2proto_core::{
    ColumnDescriptor, File, TableDescriptor, TableKind, map_column_type, to_pascal_case,
};
use tracing::{debug, info};

use crate::{Emitter, FieldDefinition, SchemaSource, TableDefinition};

/// Build the definition for one table.
///
/// Returns `None` for tables that are not base tables and for tables that
/// `rule` excludes as a whole. `columns` must be in ordinal order; columns
/// excluded by `rule` are dropped and the remaining ones are numbered `1..=n`
/// without gaps.
pub fn convert_table(
    table: &TableDescriptor,
    columns: &[ColumnDescriptor],
    rule: Option<&IgnoreRule>,
) -> Option<TableDefinition> {
    if !table.kind.is_convertible() || rule.is_some_and(IgnoreRule::excludes_table) {
        return None;
    }

    let fields = columns
        .iter()
        .filter(|column| !rule.is_some_and(|r| r.excludes_column(&column.name)))
        .zip(1..)
        .map(|(column, number)| FieldDefinition {
            name: column.name.clone(),
            ty: map_column_type(&column.data_type),
            number,
        })
        .collect();

    Some(TableDefinition {
        name: to_pascal_case(&table.name),
        fields,
    })
}

/// What happened to a table that reached a converter.
#[derive(Debug)]
pub enum TableOutcome {
    /// A definition was built and emitted.
    Converted {
        table: String,
        definition: TableDefinition,
        file: File,
    },
    /// Excluded as a whole by an ignore rule.
    Ignored { table: String },
    /// Not a base table.
    NotConvertible { table: String, kind: TableKind },
    /// The catalog reported no columns.
    NoColumns { table: String },
}

/// Converts a single table: fetch columns, build the definition, emit it.
pub struct TableConverter<S: ?Sized, E: ?Sized> {
    pub source: Arc<S>,
    pub emitter: Arc<E>,
    pub rules: Arc<IgnoreRules>,
    pub schema: Arc<str>,
}

impl<S, E> TableConverter<S, E>
where
    S: SchemaSource + ?Sized,
    E: Emitter + ?Sized,
{
    pub async fn run(&self, table: TableDescriptor) -> Result<TableOutcome> {
        if !table.kind.is_convertible() {
            debug!(table = %table.name, kind = %table.kind, "skipping non-base table");
            return Ok(TableOutcome::NotConvertible {
                table: table.name,
                kind: table.kind,
            });
        }

        let rule = self.rules.rule_for(&table.name);
        if rule.is_some_and(IgnoreRule::excludes_table) {
            debug!(table = %table.name, "table ignored by config");
            return Ok(TableOutcome::Ignored { table: table.name });
        }

        let columns = self
            .source
            .columns(&self.schema, &table.name)
            .await
            .wrap_err_with(|| format!("failed to fetch columns of table `{}`", table.name))?;

        if columns.is_empty() {
            debug!(table = %table.name, "table has no columns");
            return Ok(TableOutcome::NoColumns { table: table.name });
        }

        let Some(definition) = convert_table(&table, &columns, rule) else {
            return Ok(TableOutcome::NotConvertible {
                table: table.name,
                kind: table.kind,
            });
        };

        let file = self.emitter.emit(&table.name, &definition)?;
        info!(
            table = %table.name,
            name = %definition.name,
            fields = definition.fields.len(),
            ignored = columns.len() - definition.fields.len(),
            "converted table"
        );

        Ok(TableOutcome::Converted {
            table: table.name,
            definition,
            file,
        })
    }
}
