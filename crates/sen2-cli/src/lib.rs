// Rust guideline compliant 2026-10-17

//! sen2cli CLI library.
//!
//! This library exposes the CLI modules for use in tests and external code.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

pub use output::{create_formatter, OutputFormat, OutputFormatter};
pub use terminal::should_use_color;
