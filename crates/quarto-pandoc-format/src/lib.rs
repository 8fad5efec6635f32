/*
 * quarto-pandoc-format
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc markdown format resolution for the Quarto visual editor.
 */

//! Pandoc markdown format resolution.
//!
//! The visual editor reads and writes markdown through Pandoc, so it needs to
//! know exactly which Pandoc format (and which extensions) a document uses.
//! This crate turns a requested mode plus extension toggles into:
//!
//! - the canonical Pandoc format string (`markdown_strict+pipe_tables+...`),
//! - the full set of active extensions,
//! - warnings for unknown formats and extensions.
//!
//! # Example
//!
//! ```ignore
//! use quarto_pandoc_format::{FormatSpec, NativePandoc, resolve_format};
//!
//! let pandoc = NativePandoc::discover()?;
//! let spec = FormatSpec::new("gfm", "+smart");
//! let resolved = resolve_format(&pandoc, &spec).await?;
//!
//! assert_eq!(resolved.base_name, "markdown_strict");
//! if !resolved.warnings.is_empty() {
//!     // surface a notice to the user
//! }
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod extensions;
pub mod format_string;
pub mod resolve;
pub mod variants;

pub use config::{FormatConfig, coerce_boolean, coerce_string};
pub use document::{
    format_config_from_comment, format_config_from_document, format_config_from_yaml,
};
pub use engine::{NativePandoc, PandocEngine};
pub use error::{PandocError, Result};
pub use extensions::{
    ExtensionMap, ExtensionToken, has_fenced_code_blocks, parse_extensions, serialize_extension,
};
pub use format_string::{FormatParts, compose_format, format_with, split_format};
pub use resolve::{FormatSpec, FormatWarnings, ResolvedFormat, resolve_format};
pub use variants::{is_known_base_format, variant_tokens};

#[cfg(not(target_arch = "wasm32"))]
pub use engine::find_pandoc;
