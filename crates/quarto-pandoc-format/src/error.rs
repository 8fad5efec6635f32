/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Error types for Pandoc engine queries.
 */

//! Error types for Pandoc engine queries.
//!
//! Unknown formats and extension options are never errors; they are reported
//! as [`FormatWarnings`](crate::FormatWarnings) on a successful resolution.
//! A [`PandocError`] means the engine itself could not answer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from querying the Pandoc engine.
#[derive(Debug, Error)]
pub enum PandocError {
    /// No pandoc binary was found.
    #[error("Pandoc not found (set QUARTO_PANDOC or add pandoc to PATH)")]
    NotFound,

    /// The pandoc process could not be started.
    #[error("Failed to run pandoc ({}): {source}", .binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pandoc ran but rejected the query.
    #[error("Pandoc failed listing extensions for '{format}' (exit {}): {stderr}", exit_label(.code))]
    Failed {
        format: String,
        /// Exit code, `None` if the process was killed by a signal
        code: Option<i32>,
        stderr: String,
    },
}

impl PandocError {
    /// Create a "failed" error for a format query.
    pub fn failed(format: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            format: format.into(),
            code,
            stderr: stderr.into(),
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

pub type Result<T> = std::result::Result<T, PandocError>;
