//! Schema-to-proto conversion for mysql2proto.
//!
//! # Module Organization
//!
//! - [`convert`] - Per-table conversion (`convert_table`, `TableConverter`)
//! - [`dispatch`] - Bounded-concurrency dispatch over a schema's tables
//! - [`emit`] - Output artifacts (`Emitter`, `ProtoEmitter`)
//! - [`source`] - Schema catalog access (`SchemaSource`)
//! - [`testing`] - Test utilities (feature-gated)

mod code_builder;
pub mod convert;
pub mod dispatch;
pub mod emit;
mod model;
mod render;
pub mod source;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use code_builder::CodeBuilder;
pub use convert::{TableConverter, TableOutcome, convert_table};
pub use dispatch::{
    Converted, DEFAULT_CONCURRENCY, DispatchSummary, Dispatcher, SkipReason, resolve_tables,
};
pub use emit::{Emitter, ProtoEmitter};
pub use model::{FieldDefinition, TableDefinition};
pub use render::ProtoFile;
pub use source::SchemaSource;
