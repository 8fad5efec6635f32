/*
 * resolve.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Resolution of a requested markdown format against Pandoc.
 */

//! Resolution of a requested markdown format against Pandoc.
//!
//! The editor stores a requested mode (`markdown`, `gfm`, `goldmark`, ...)
//! and a string of extension toggles. Resolution turns those into:
//!
//! - the canonical format string passed to Pandoc (`full_name`),
//! - the complete extension state for that format,
//! - warnings for anything Pandoc would not accept.
//!
//! # Validation
//!
//! Requested extensions are validated against the extension list Pandoc
//! reports for the base format. Variants are emulated on `markdown_strict`,
//! but `gfm` and `commonmark` are validated against Pandoc's own `gfm` /
//! `commonmark` lists, so an extension those readers don't know is rejected
//! even if `markdown_strict` would take it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::FormatConfig;
use crate::engine::PandocEngine;
use crate::error::Result;
use crate::extensions::{ExtensionMap, has_fenced_code_blocks, parse_extensions};
use crate::variants::{
    MARKDOWN, MARKDOWN_STRICT, is_known_base_format, is_native_extended_format, variant_tokens,
};

/// A requested format, as read from document or user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSpec {
    /// Requested base format or variant name
    pub requested_mode: String,
    /// Requested extension toggles (raw token string)
    pub requested_options: String,
    /// Whether Hugo variants should read `$math$` written in code spans
    pub math_in_code: bool,

    // Pass-through settings; not consumed by resolution.
    pub wrap: Option<String>,
    pub doctypes: Vec<String>,
    pub references: Option<String>,
    pub canonical: bool,
}

impl FormatSpec {
    pub fn new(mode: impl Into<String>, options: impl Into<String>) -> Self {
        Self {
            requested_mode: mode.into(),
            requested_options: options.into(),
            ..Self::default()
        }
    }

    pub fn with_math_in_code(mut self, math_in_code: bool) -> Self {
        self.math_in_code = math_in_code;
        self
    }

    /// Build a [`FormatSpec`] from extracted document configuration.
    ///
    /// A missing mode means plain `markdown`.
    pub fn from_config(config: &FormatConfig, math_in_code: bool) -> Self {
        Self {
            requested_mode: config.mode.clone().unwrap_or_else(|| MARKDOWN.to_string()),
            requested_options: config.extensions.clone().unwrap_or_default(),
            math_in_code,
            wrap: config.wrap.clone(),
            doctypes: config.doctypes.clone(),
            references: config.references.clone(),
            canonical: config.canonical.unwrap_or(false),
        }
    }
}

/// Non-fatal problems found while resolving a format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatWarnings {
    /// The unrecognized base format, or empty if the base was recognized
    pub invalid_format: String,
    /// Unrecognized extension names, one entry per occurrence
    pub invalid_options: Vec<String>,
}

impl FormatWarnings {
    pub fn is_empty(&self) -> bool {
        self.invalid_format.is_empty() && self.invalid_options.is_empty()
    }
}

/// The result of resolving a [`FormatSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFormat {
    /// The mode exactly as requested (even if it fell back)
    pub mode: String,
    /// The concrete Pandoc base format
    pub base_name: String,
    /// `base_name` followed by every applied extension token
    pub full_name: String,
    /// Complete extension state for the format
    pub extensions: ExtensionMap,
    pub warnings: FormatWarnings,
}

impl ResolvedFormat {
    pub fn has_fenced_code_blocks(&self) -> bool {
        has_fenced_code_blocks(&self.extensions)
    }

    pub fn is_enabled(&self, extension: &str) -> bool {
        self.extensions.is_enabled(extension)
    }
}

/// Resolve a requested format against the Pandoc engine.
///
/// Unknown base formats fall back to `markdown` and unknown extensions are
/// dropped; both are reported in [`ResolvedFormat::warnings`]. Errors from
/// the engine are returned as-is.
pub async fn resolve_format<E>(engine: &E, spec: &FormatSpec) -> Result<ResolvedFormat>
where
    E: PandocEngine + ?Sized,
{
    let mut warnings = FormatWarnings::default();

    let mut base_name = spec.requested_mode.as_str();
    if !is_known_base_format(base_name) {
        tracing::debug!(
            format = base_name,
            "Unknown base format, falling back to {MARKDOWN}"
        );
        warnings.invalid_format = base_name.to_string();
        base_name = MARKDOWN;
    }

    // gfm and commonmark validate against their native extension lists
    let native_options = if is_native_extended_format(base_name) {
        Some(engine.list_extensions(base_name).await?)
    } else {
        None
    };

    let merged_options = match variant_tokens(base_name, spec.math_in_code) {
        Some(tokens) => {
            tracing::debug!(
                variant = base_name,
                "Emulating variant on {MARKDOWN_STRICT}"
            );
            base_name = MARKDOWN_STRICT;
            tokens.concat() + &spec.requested_options
        }
        None => spec.requested_options.clone(),
    };

    let format_options = engine.list_extensions(base_name).await?;
    let valid_options = native_options.as_deref().unwrap_or(&format_options);

    let mut extensions = ExtensionMap::from_token_string(&format_options);
    let valid_names: HashSet<String> = parse_extensions(valid_options)
        .into_iter()
        .map(|token| token.name)
        .collect();

    let mut full_name = base_name.to_string();
    for token in parse_extensions(&merged_options) {
        if valid_names.contains(&token.name) {
            full_name.push_str(&token.to_token_string());
            extensions.set(token.name, token.enabled);
        } else {
            tracing::trace!(extension = %token.name, base = base_name, "Unknown extension");
            warnings.invalid_options.push(token.name);
        }
    }

    tracing::debug!(
        mode = %spec.requested_mode,
        full_name = %full_name,
        "Resolved pandoc format"
    );

    Ok(ResolvedFormat {
        mode: spec.requested_mode.clone(),
        base_name: base_name.to_string(),
        full_name,
        extensions,
        warnings,
    })
}
