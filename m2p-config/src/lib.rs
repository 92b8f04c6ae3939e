// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration for mysql2proto.
//!
//! Covers everything that is validated before a conversion starts: the
//! server endpoint, the schema name and the optional YAML ignore file.

mod error;
mod ignore;
mod server;

pub use error::{Error, Result};
pub use ignore::{IgnoreConfig, IgnoreEntry, IgnoreRule, IgnoreRules};
pub use server::{ServerConfig, validate_schema_name};
