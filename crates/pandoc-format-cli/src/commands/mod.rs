//! Command implementations for the pandoc-format CLI
//!
//! Each command module handles the CLI interface and delegates to
//! quarto-pandoc-format for the actual work.

pub mod config;
pub mod resolve;
