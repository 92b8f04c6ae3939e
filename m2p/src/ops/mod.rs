//! Core operations.
//!
//! This module contains the business logic of the converter,
//! separated from CLI argument parsing and output rendering.

pub mod convert;

pub use convert::{ConvertOptions, convert};
