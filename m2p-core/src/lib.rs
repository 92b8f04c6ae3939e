//! Core utilities and types for mysql2proto.
//!
//! This crate provides the schema metadata records, the column type
//! mapping and the file helpers shared by the rest of the workspace.

mod file;
mod type_mapper;
mod types;
mod utils;

// File operations
pub use file::{File, GeneratedFile};
// Type mapping
pub use type_mapper::{IdlType, ProtoTypeMapper, TypeMapper, map_column_type};
// Schema metadata
pub use types::{ColumnDescriptor, TableDescriptor, TableKind};
// String utilities
pub use utils::to_pascal_case;
