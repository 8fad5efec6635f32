/*
 * extensions.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc extension token grammar.
 */

//! Pandoc extension tokens.
//!
//! Pandoc describes optional format features as a run of `+name` / `-name`
//! tokens, both on the command line (`markdown+footnotes-smart`) and in the
//! output of `pandoc --list-extensions=FORMAT` (one token per line). This
//! module parses that grammar into [`ExtensionToken`]s and folds tokens into
//! an [`ExtensionMap`].

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EXTENSION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[+-][a-z_]+").expect("valid extension token regex"));

/// A single `+name` or `-name` extension toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionToken {
    pub name: String,
    pub enabled: bool,
}

impl ExtensionToken {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }

    /// Render the token back to `+name` / `-name` form.
    pub fn to_token_string(&self) -> String {
        serialize_extension(&self.name, self.enabled)
    }
}

impl std::fmt::Display for ExtensionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.enabled { '+' } else { '-' }, self.name)
    }
}

/// Parse an extension token string into an ordered list of tokens.
///
/// Lines are joined with no separator before matching, so a token that is
/// split across a line break is read as a single (fused) token. Any text
/// between tokens that does not match `[+-][a-z_]+` is ignored.
pub fn parse_extensions(tokens: &str) -> Vec<ExtensionToken> {
    let joined: String = tokens.lines().collect();
    EXTENSION_TOKEN_RE
        .find_iter(&joined)
        .map(|m| {
            let text = m.as_str();
            ExtensionToken::new(&text[1..], text.starts_with('+'))
        })
        .collect()
}

/// Serialize a single extension toggle as `+name` or `-name`.
pub fn serialize_extension(name: &str, enabled: bool) -> String {
    format!("{}{}", if enabled { "+" } else { "-" }, name)
}

/// Resolved extension state, keyed by extension name.
///
/// Keys keep the order in which they were first inserted; assigning an
/// existing key updates it in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionMap(IndexMap<String, bool>);

impl ExtensionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold tokens left to right; a later token for the same name wins.
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a ExtensionToken>) -> Self {
        let mut map = Self::new();
        for token in tokens {
            map.set(token.name.clone(), token.enabled);
        }
        map
    }

    /// Parse a token string and fold it into a map.
    pub fn from_token_string(tokens: &str) -> Self {
        Self::from_tokens(&parse_extensions(tokens))
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    /// Whether an extension is enabled. Unknown extensions are disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, enabled)| (name.as_str(), *enabled))
    }

    /// Names of all enabled extensions, in map order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|(name, enabled)| enabled.then_some(name))
    }

    /// Serialize every entry back to a token string (`+a-b+c`).
    pub fn to_token_string(&self) -> String {
        self.iter()
            .map(|(name, enabled)| serialize_extension(name, enabled))
            .collect()
    }
}

impl FromIterator<ExtensionToken> for ExtensionMap {
    fn from_iter<I: IntoIterator<Item = ExtensionToken>>(iter: I) -> Self {
        let mut map = Self::new();
        for token in iter {
            map.set(token.name, token.enabled);
        }
        map
    }
}

/// Whether fenced code blocks of either flavor are available.
pub fn has_fenced_code_blocks(extensions: &ExtensionMap) -> bool {
    extensions.is_enabled("backtick_code_blocks") || extensions.is_enabled("fenced_code_blocks")
}
