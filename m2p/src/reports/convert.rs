//! Convert report data structures.

use std::path::{Path, PathBuf};

use mysql2proto_codegen::{DispatchSummary, SkipReason};
use mysql2proto_core::File;

use super::output::{Output, Report};

/// Report data from a conversion run.
#[derive(Debug)]
pub struct ConvertReport {
    /// Converted schema.
    pub schema: String,

    /// Output directory.
    pub output_dir: PathBuf,

    /// Tables that produced nothing, with the reason.
    pub skipped: Vec<(String, SkipReason)>,

    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written { files: Vec<PathBuf> },
    /// Dry-run preview.
    Preview { files: Vec<File> },
}

impl ConvertReport {
    pub fn new(schema: &str, output_dir: &Path, dry_run: bool, summary: DispatchSummary) -> Self {
        let files = summary.converted.into_iter().map(|c| c.file);
        let result = if dry_run {
            GenerationResult::Preview {
                files: files.collect(),
            }
        } else {
            GenerationResult::Written {
                files: files.map(|f| f.path().to_path_buf()).collect(),
            }
        };

        Self {
            schema: schema.to_string(),
            output_dir: output_dir.to_path_buf(),
            skipped: summary.skipped,
            result,
        }
    }
}

impl Report for ConvertReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written { files } => self.render_written(out, files),
            GenerationResult::Preview { files } => self.render_preview(out, files),
        }
    }
}

impl ConvertReport {
    fn render_written(&self, out: &mut dyn Output, files: &[PathBuf]) {
        out.key_value("Database", &self.schema);
        out.key_value("Output", &self.output_dir.display().to_string());
        out.newline();

        out.section(&format!("Generated ({})", files.len()));
        for file in files {
            out.added_item(&file.display().to_string());
        }

        self.render_skipped(out);
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[File]) {
        for file in files {
            out.divider(&file.path().display().to_string());
            out.preformatted(file.content());
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
        self.render_skipped(out);
    }

    fn render_skipped(&self, out: &mut dyn Output) {
        if self.skipped.is_empty() {
            return;
        }

        out.newline();
        out.section(&format!("Skipped ({})", self.skipped.len()));
        for (table, reason) in &self.skipped {
            out.skipped_item(&format!("{} ({})", table, reason));
        }
    }
}

#[cfg(test)]
mod tests {
    use mysql2proto_codegen::{Converted, TableDefinition};
    use mysql2proto_core::TableKind;

    use super::*;
    use crate::reports::output::BufferOutput;

    fn summary() -> DispatchSummary {
        DispatchSummary {
            converted: vec![Converted {
                table: "orders".to_string(),
                definition: TableDefinition {
                    name: "Orders".to_string(),
                    fields: Vec::new(),
                },
                file: File::new("out/orders.proto", "message Orders {\n}\n"),
            }],
            skipped: vec![
                (
                    "orders_view".to_string(),
                    SkipReason::NotConvertible(TableKind::View),
                ),
                ("secrets".to_string(), SkipReason::Ignored),
            ],
        }
    }

    #[test]
    fn test_render_written() {
        let report = ConvertReport::new("shop", Path::new("out"), false, summary());
        let mut out = BufferOutput::default();

        report.render(&mut out);

        assert_eq!(
            out.lines,
            [
                "Database: shop",
                "Output: out",
                "",
                "Generated (1):",
                format!("  + {}", Path::new("out/orders.proto").display()).as_str(),
                "",
                "Skipped (2):",
                "  - orders_view (VIEW)",
                "  - secrets (ignored by config)",
            ]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = ConvertReport::new("shop", Path::new("out"), true, summary());
        let mut out = BufferOutput::default();

        report.render(&mut out);

        assert_eq!(out.lines[1], "message Orders {\n}\n");
        assert!(out.lines.contains(&"1 files would be generated".to_string()));
        assert!(out.lines.contains(&"  - secrets (ignored by config)".to_string()));
    }
}
