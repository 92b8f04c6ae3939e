//! Convert operation - one proto file per table of a schema.

use std::{path::Path, sync::Arc};

use eyre::Result;
use mysql2proto_codegen::{Dispatcher, ProtoEmitter, SchemaSource, resolve_tables};
use mysql2proto_config::IgnoreRules;
use tracing::info;

use crate::reports::ConvertReport;

/// Options for the convert operation.
pub struct ConvertOptions<'a> {
    /// Output directory for generated files.
    pub output_dir: &'a Path,
    /// Optional `package` statement.
    pub package: Option<String>,
    /// Number of admission slots.
    pub concurrency: usize,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the convert operation.
///
/// Resolves the schema's tables, then converts them concurrently.
pub async fn convert<S>(
    source: Arc<S>,
    schema: &str,
    rules: IgnoreRules,
    opts: ConvertOptions<'_>,
) -> Result<ConvertReport>
where
    S: SchemaSource + 'static,
{
    let tables = resolve_tables(source.as_ref(), schema).await?;
    info!(schema, tables = tables.len(), "resolved schema");

    let emitter = ProtoEmitter::new(opts.output_dir)
        .package(opts.package)
        .dry_run(opts.dry_run);
    let summary = Dispatcher::new(source, Arc::new(emitter))
        .capacity(opts.concurrency)
        .run(schema, tables, Arc::new(rules))
        .await?;

    Ok(ConvertReport::new(
        schema,
        opts.output_dir,
        opts.dry_run,
        summary,
    ))
}
