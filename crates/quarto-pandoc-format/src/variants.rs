/*
 * variants.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markdown variant bundles and known base formats.
 */

//! Markdown variants emulated on top of `markdown_strict`.
//!
//! Some flavors the editor supports are not round-tripped faithfully by
//! Pandoc's own readers/writers, so they are expressed as `markdown_strict`
//! plus a fixed bundle of extension tokens. The Hugo bundles (goldmark and
//! blackfriday) mirror the defaults of those renderers.

/// The default base format, used when the requested one is unknown.
pub const MARKDOWN: &str = "markdown";

/// The base format every variant bundle is layered on.
pub const MARKDOWN_STRICT: &str = "markdown_strict";

pub const GFM: &str = "gfm";
pub const COMMONMARK: &str = "commonmark";
pub const GOLDMARK: &str = "goldmark";
pub const BLACKFRIDAY: &str = "blackfriday";

/// Extension appended to the Hugo bundles when math is written in code spans.
pub const TEX_MATH_DOLLARS: &str = "+tex_math_dollars";

/// Pandoc's markdown and its documented sub-dialects.
pub const MARKDOWN_DIALECTS: &[&str] = &[
    MARKDOWN,
    "markdown_phpextra",
    "markdown_github",
    "markdown_mmd",
    MARKDOWN_STRICT,
];

/// Native Pandoc targets whose own extension list is used for validation.
pub const NATIVE_EXTENDED_FORMATS: &[&str] = &[GFM, COMMONMARK];

/// A named preset of extension defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantBundle {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
    /// Token appended only when math-in-code is enabled.
    pub math_token: Option<&'static str>,
}

impl VariantBundle {
    /// The bundle's tokens, including the conditional math token.
    pub fn tokens(&self, math_in_code: bool) -> Vec<&'static str> {
        let mut tokens = self.tokens.to_vec();
        if math_in_code {
            tokens.extend(self.math_token);
        }
        tokens
    }
}

const COMMONMARK_TOKENS: &[&str] = &["+raw_html"];

const GFM_TOKENS: &[&str] = &[
    "+all_symbols_escapable",
    "+auto_identifiers",
    "+autolink_bare_uris",
    "+backtick_code_blocks",
    "+emoji",
    "+fenced_code_blocks",
    "+gfm_auto_identifiers",
    "+intraword_underscores",
    "+lists_without_preceding_blankline",
    "+pipe_tables",
    "+raw_html",
    "+shortcut_reference_links",
    "+space_in_atx_header",
    "+strikeout",
    "+task_lists",
];

// Hugo's goldmark renderer strips raw html unless `unsafe` is set
const GOLDMARK_TOKENS: &[&str] = &[
    "-raw_html",
    "+pipe_tables",
    "+strikeout",
    "+autolink_bare_uris",
    "+task_lists",
    "+backtick_code_blocks",
    "+definition_lists",
    "+footnotes",
    "+smart",
    "+yaml_metadata_block",
];

const BLACKFRIDAY_TOKENS: &[&str] = &[
    "+intraword_underscores",
    "+pipe_tables",
    "+backtick_code_blocks",
    "+definition_lists",
    "+footnotes",
    "+autolink_bare_uris",
    "+strikeout",
    "+smart",
    "+yaml_metadata_block",
];

/// All variant bundles, in registry order.
pub const VARIANT_BUNDLES: &[VariantBundle] = &[
    VariantBundle {
        name: COMMONMARK,
        tokens: COMMONMARK_TOKENS,
        math_token: None,
    },
    VariantBundle {
        name: GFM,
        tokens: GFM_TOKENS,
        math_token: None,
    },
    VariantBundle {
        name: GOLDMARK,
        tokens: GOLDMARK_TOKENS,
        math_token: Some(TEX_MATH_DOLLARS),
    },
    VariantBundle {
        name: BLACKFRIDAY,
        tokens: BLACKFRIDAY_TOKENS,
        math_token: Some(TEX_MATH_DOLLARS),
    },
];

/// Look up a variant bundle by name.
pub fn variant_bundle(name: &str) -> Option<&'static VariantBundle> {
    VARIANT_BUNDLES.iter().find(|bundle| bundle.name == name)
}

/// Tokens for the named variant, or `None` if `name` is not a variant.
pub fn variant_tokens(name: &str, math_in_code: bool) -> Option<Vec<&'static str>> {
    variant_bundle(name).map(|bundle| bundle.tokens(math_in_code))
}

pub fn is_native_extended_format(name: &str) -> bool {
    NATIVE_EXTENDED_FORMATS.contains(&name)
}

/// Every base format name the resolver accepts.
pub fn known_base_formats() -> impl Iterator<Item = &'static str> {
    MARKDOWN_DIALECTS
        .iter()
        .chain(NATIVE_EXTENDED_FORMATS)
        .copied()
        .chain(VARIANT_BUNDLES.iter().map(|bundle| bundle.name))
}

pub fn is_known_base_format(name: &str) -> bool {
    known_base_formats().any(|known| known == name)
}
