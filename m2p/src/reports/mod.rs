//! Report data structures.
//!
//! Operations build reports, then render them to an Output target.

mod convert;
mod output;

pub use convert::{ConvertReport, GenerationResult};
pub use output::{Report, TerminalOutput};
