/*
 * format_string.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Splitting and composing Pandoc format strings.
 */

//! Splitting and composing Pandoc format strings (`base+ext-ext`).

/// A format string split into its base name and extension options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatParts<'a> {
    pub base: &'a str,
    /// Everything after the base, including the leading sign.
    pub options: &'a str,
}

/// Split a format string into base and options.
///
/// The split happens at the leftmost `-`, or if there is none, at the
/// leftmost `+`. A base name that itself contains either sign is therefore
/// split in the wrong place.
pub fn split_format(format: &str) -> FormatParts<'_> {
    match format.find('-').or_else(|| format.find('+')) {
        Some(index) => FormatParts {
            base: &format[..index],
            options: &format[index..],
        },
        None => FormatParts {
            base: format,
            options: "",
        },
    }
}

/// Concatenate a base format with extension options.
pub fn compose_format(base: &str, prepend: &str, options: &str, append: &str) -> String {
    let mut format = String::with_capacity(base.len() + prepend.len() + options.len() + append.len());
    format.push_str(base);
    format.push_str(prepend);
    format.push_str(options);
    format.push_str(append);
    format
}

/// Add options to an existing format string.
///
/// `prepend` goes between the base and the existing options, `append` after
/// them, so `append` overrides and `prepend` is overridden by existing options.
pub fn format_with(format: &str, prepend: &str, append: &str) -> String {
    let parts = split_format(format);
    compose_format(parts.base, prepend, parts.options, append)
}
