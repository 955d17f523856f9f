//! Report rendering for the command-line interface

pub mod formatter;

pub use formatter::{OutputFormatter, ReportGenerator};
