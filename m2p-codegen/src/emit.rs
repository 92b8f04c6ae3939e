//! Turning a definition into an output artifact.

use std::path::PathBuf;

use eyre::{Context, Result};
use mysql2proto_core::{File, GeneratedFile};

use crate::{TableDefinition, render::ProtoFile};

/// Receives each converted table.
///
/// Called concurrently from conversion tasks.
pub trait Emitter: Send + Sync {
    /// Produce the artifact named `artifact` for `definition`.
    fn emit(&self, artifact: &str, definition: &TableDefinition) -> Result<File>;
}

/// Renders proto3 files into an output directory.
#[derive(Debug, Clone)]
pub struct ProtoEmitter {
    output_dir: PathBuf,
    package: Option<String>,
    dry_run: bool,
}

impl ProtoEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            package: None,
            dry_run: false,
        }
    }

    /// Emit a `package` statement in every file.
    pub fn package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    /// Render without writing to disk.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Emitter for ProtoEmitter {
    fn emit(&self, artifact: &str, definition: &TableDefinition) -> Result<File> {
        let file = ProtoFile::new(artifact, definition)
            .package(self.package.as_deref())
            .to_file(&self.output_dir);

        if !self.dry_run {
            file.write()
                .wrap_err_with(|| format!("failed to write proto for table `{}`", artifact))?;
        }

        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use mysql2proto_core::IdlType;
    use tempfile::TempDir;

    use super::*;
    use crate::FieldDefinition;

    fn users() -> TableDefinition {
        TableDefinition {
            name: "UserProfile".to_string(),
            fields: vec![FieldDefinition {
                name: "user_id".to_string(),
                ty: IdlType::Int64,
                number: 1,
            }],
        }
    }

    #[test]
    fn test_emit_writes_file_named_after_table() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("proto");
        let emitter = ProtoEmitter::new(&out);

        let file = emitter.emit("user_profile", &users()).unwrap();

        assert_eq!(file.path(), out.join("user_profile.proto"));
        let written = fs::read_to_string(out.join("user_profile.proto")).unwrap();
        assert_eq!(written, file.content());
        assert!(written.contains("message UserProfile {"));
        assert!(written.contains("  int64 user_id = 1;"));
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let temp = TempDir::new().unwrap();
        let emitter = ProtoEmitter::new(temp.path())
            .package(Some("shop".to_string()))
            .dry_run(true);

        let file = emitter.emit("user_profile", &users()).unwrap();

        assert!(file.content().contains("package shop;"));
        assert!(!temp.path().join("user_profile.proto").exists());
    }

    #[test]
    fn test_write_failure_names_table() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = ProtoEmitter::new(&blocker)
            .emit("user_profile", &users())
            .unwrap_err();

        assert!(err.to_string().contains("user_profile"));
    }
}
