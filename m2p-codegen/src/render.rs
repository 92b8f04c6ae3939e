//! proto3 rendering of a table definition.

use std::path::{Path, PathBuf};

use mysql2proto_core::{GeneratedFile, ProtoTypeMapper, TypeMapper};

use crate::{CodeBuilder, TableDefinition};

const HEADER: &str = "Code generated by mysql2proto. DO NOT EDIT.";

/// The `<table>.proto` file for one table.
pub struct ProtoFile<'a> {
    /// Original table name, used for the file name.
    pub artifact: &'a str,
    pub definition: &'a TableDefinition,
    pub package: Option<&'a str>,
}

impl<'a> ProtoFile<'a> {
    pub fn new(artifact: &'a str, definition: &'a TableDefinition) -> Self {
        Self {
            artifact,
            definition,
            package: None,
        }
    }

    pub fn package(mut self, package: Option<&'a str>) -> Self {
        self.package = package;
        self
    }
}

impl GeneratedFile for ProtoFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.proto", self.artifact))
    }

    fn render(&self) -> String {
        let mapper = ProtoTypeMapper;

        CodeBuilder::proto()
            .comment(HEADER)
            .line(&format!("syntax = \"{}\";", mapper.format()))
            .blank()
            .each(self.package, |b, package| {
                b.line(&format!("package {};", package)).blank()
            })
            .block_with_close(
                &format!("message {} {{", self.definition.name),
                "}",
                |b| {
                    b.each(&self.definition.fields, |b, field| {
                        b.line(&format!(
                            "{} {} = {};",
                            mapper.map_type(field.ty),
                            field.name,
                            field.number
                        ))
                    })
                },
            )
            .build()
    }
}
