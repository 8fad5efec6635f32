/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markdown format configuration read from documents.
 */

//! Markdown format configuration read from documents.
//!
//! Documents can carry editor settings for their markdown format, either in
//! YAML front matter:
//!
//! ```yaml
//! editor_options:
//!   markdown:
//!     mode: gfm
//!     extensions: +emoji
//!     wrap: 72
//! ```
//!
//! or in a single-line marker comment (see [`crate::document`]). Both are
//! read into a [`FormatConfig`] through the same key recognition.
//!
//! YAML values are loosely typed, so every read goes through an explicit
//! accessor ([`yaml_get`], [`yaml_path`], [`find_key`]) and a coercion
//! ([`coerce_string`], [`coerce_boolean`]).

use serde::{Deserialize, Serialize};
use yaml_rust2::Yaml;
use yaml_rust2::yaml::Hash;

/// Markdown format settings found in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Base format or variant (`markdown`, `gfm`, `goldmark`, ...)
    pub mode: Option<String>,
    /// Extension toggles as a raw token string
    pub extensions: Option<String>,
    /// R Markdown specific extensions as a raw token string
    pub rmd_extensions: Option<String>,
    /// Line wrapping: `none`, `sentence`, or a column number
    pub wrap: Option<String>,
    pub doctypes: Vec<String>,
    /// Reference link placement (`block`, `section`, `document`)
    pub references: Option<String>,
    /// Whether to write canonical markdown
    pub canonical: Option<bool>,
}

impl FormatConfig {
    /// Read recognized keys from a YAML mapping.
    ///
    /// Keys whose values are unset (null, `false`, empty, zero) are ignored.
    /// Non-mapping input yields an empty config.
    pub fn from_yaml(source: &Yaml) -> Self {
        let read = |key: &str| yaml_get(source, key).filter(|value| is_set(value));
        let read_string = |key: &str| read(key).map(coerce_string);

        let wrap = ["wrap", "wrap_column", "fill-column"]
            .into_iter()
            .find_map(&read_string);

        let doctypes = read_string("doctype")
            .map(|doctype| {
                doctype
                    .split(',')
                    .map(|item| item.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let references = read("references").and_then(|references| match references {
            Yaml::Hash(_) => yaml_get(references, "location")
                .filter(|value| is_set(value))
                .map(coerce_string),
            other => Some(coerce_string(other)),
        });

        Self {
            mode: read_string("mode"),
            extensions: read_string("extensions"),
            rmd_extensions: read_string("rmd_extensions"),
            wrap,
            doctypes,
            references,
            canonical: read("canonical").map(coerce_boolean),
        }
    }

    /// Read recognized keys from string key/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut hash = Hash::new();
        for (key, value) in pairs {
            hash.insert(Yaml::String(key.into()), Yaml::String(value.into()));
        }
        Self::from_yaml(&Yaml::Hash(hash))
    }

    /// Whether no recognized key was read.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Look up `key` in a YAML mapping.
pub fn yaml_get<'a>(yaml: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    yaml.as_hash()?
        .get(&Yaml::String(key.to_string()))
        .filter(|value| !value.is_badvalue())
}

/// Follow a path of mapping keys, e.g. `["editor_options", "markdown"]`.
pub fn yaml_path<'a>(yaml: &'a Yaml, path: &[&str]) -> Option<&'a Yaml> {
    path.iter().try_fold(yaml, |node, key| yaml_get(node, key))
}

/// Depth-first search for the first value stored under `key`, at any depth.
pub fn find_key<'a>(yaml: &'a Yaml, key: &str) -> Option<&'a Yaml> {
    match yaml {
        Yaml::Hash(hash) => hash.iter().find_map(|(k, value)| {
            if k.as_str() == Some(key) {
                Some(value)
            } else {
                find_key(value, key)
            }
        }),
        Yaml::Array(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}

/// Coerce a YAML value to text.
///
/// Strings are returned as-is, other scalars are rendered, sequences of
/// scalars are joined with `,`. Anything else becomes the empty string.
pub fn coerce_string(yaml: &Yaml) -> String {
    match yaml {
        Yaml::String(s) | Yaml::Real(s) => s.clone(),
        Yaml::Integer(i) => i.to_string(),
        Yaml::Boolean(b) => b.to_string(),
        Yaml::Array(items) => items
            .iter()
            .map(coerce_string)
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}

/// Coerce a YAML value to a boolean: `true`, `"true"` (any case) or `"1"`.
pub fn coerce_boolean(yaml: &Yaml) -> bool {
    match yaml {
        Yaml::Boolean(b) => *b,
        other => {
            let text = coerce_string(other).to_lowercase();
            text == "true" || text == "1"
        }
    }
}

/// Whether a value counts as set: not null, `false`, empty or zero.
fn is_set(yaml: &Yaml) -> bool {
    match yaml {
        Yaml::Null | Yaml::BadValue => false,
        Yaml::Boolean(b) => *b,
        Yaml::String(s) => !s.is_empty(),
        Yaml::Integer(i) => *i != 0,
        Yaml::Real(s) => s.parse::<f64>().is_ok_and(|f| f != 0.0 && !f.is_nan()),
        Yaml::Array(_) | Yaml::Hash(_) | Yaml::Alias(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust2::YamlLoader;

    fn load(yaml: &str) -> Yaml {
        YamlLoader::load_from_str(yaml)
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_read_all_keys() {
        let yaml = load(
            r#"
mode: gfm
extensions: +emoji-smart
rmd_extensions: +tex_math_dollars
wrap: sentence
doctype: "hugo, bookdown"
references: section
canonical: "TRUE"
"#,
        );
        let config = FormatConfig::from_yaml(&yaml);
        assert_eq!(config.mode.as_deref(), Some("gfm"));
        assert_eq!(config.extensions.as_deref(), Some("+emoji-smart"));
        assert_eq!(config.rmd_extensions.as_deref(), Some("+tex_math_dollars"));
        assert_eq!(config.wrap.as_deref(), Some("sentence"));
        assert_eq!(config.doctypes, vec!["hugo", "bookdown"]);
        assert_eq!(config.references.as_deref(), Some("section"));
        assert_eq!(config.canonical, Some(true));
    }

    #[test]
    fn test_wrap_aliases() {
        let config = FormatConfig::from_yaml(&load("wrap_column: 72"));
        assert_eq!(config.wrap.as_deref(), Some("72"));

        let config = FormatConfig::from_yaml(&load("fill-column: 80"));
        assert_eq!(config.wrap.as_deref(), Some("80"));

        // `wrap` takes precedence
        let config = FormatConfig::from_yaml(&load("wrap: none\nwrap_column: 72"));
        assert_eq!(config.wrap.as_deref(), Some("none"));
    }

    #[test]
    fn test_doctype_sequence() {
        let config = FormatConfig::from_yaml(&load("doctype: [hugo, bookdown]"));
        assert_eq!(config.doctypes, vec!["hugo", "bookdown"]);
    }

    #[test]
    fn test_references_mapping() {
        let config = FormatConfig::from_yaml(&load("references:\n  location: document"));
        assert_eq!(config.references.as_deref(), Some("document"));

        let config = FormatConfig::from_yaml(&load("references:\n  prefix: x"));
        assert_eq!(config.references, None);
    }

    #[test]
    fn test_canonical_coercion() {
        assert_eq!(
            FormatConfig::from_yaml(&load("canonical: true")).canonical,
            Some(true)
        );
        assert_eq!(
            FormatConfig::from_yaml(&load("canonical: 1")).canonical,
            Some(true)
        );
        assert_eq!(
            FormatConfig::from_yaml(&load("canonical: \"false\"")).canonical,
            Some(false)
        );
        assert_eq!(
            FormatConfig::from_yaml(&load("canonical: yes")).canonical,
            Some(false)
        );
        // unset values are skipped entirely
        assert_eq!(FormatConfig::from_yaml(&load("canonical: false")).canonical, None);
    }

    #[test]
    fn test_unset_values_ignored() {
        let config = FormatConfig::from_yaml(&load("mode: \"\"\nextensions: ~\nwrap: 0"));
        assert!(config.is_empty());
    }

    #[test]
    fn test_non_mapping_is_empty() {
        assert!(FormatConfig::from_yaml(&load("- a\n- b")).is_empty());
        assert!(FormatConfig::from_yaml(&load("just text")).is_empty());
    }

    #[test]
    fn test_from_pairs() {
        let config = FormatConfig::from_pairs([("mode", "commonmark"), ("canonical", "1")]);
        assert_eq!(config.mode.as_deref(), Some("commonmark"));
        assert_eq!(config.canonical, Some(true));
    }

    #[test]
    fn test_yaml_path() {
        let yaml = load("editor_options:\n  markdown:\n    mode: gfm");
        let mode = yaml_path(&yaml, &["editor_options", "markdown", "mode"]);
        assert_eq!(mode.and_then(Yaml::as_str), Some("gfm"));
        assert!(yaml_path(&yaml, &["editor_options", "missing"]).is_none());
        assert!(yaml_path(&yaml, &["editor_options", "markdown", "mode", "deeper"]).is_none());
        assert!(yaml_path(&yaml, &[]).is_some());
    }

    #[test]
    fn test_find_key_depth_first() {
        let yaml = load(
            r#"
output:
  html_document:
    toc: true
    md_extensions: +emoji
  pdf_document:
    md_extensions: -smart
"#,
        );
        let found = find_key(&yaml, "md_extensions");
        assert_eq!(found.and_then(Yaml::as_str), Some("+emoji"));
        assert!(find_key(&yaml, "nope").is_none());
    }

    #[test]
    fn test_find_key_in_sequence() {
        let yaml = load("output:\n  - md_extensions: +smart");
        assert_eq!(
            find_key(&yaml, "md_extensions").and_then(Yaml::as_str),
            Some("+smart")
        );
    }

    #[test]
    fn test_coerce_string() {
        assert_eq!(coerce_string(&Yaml::String("x".into())), "x");
        assert_eq!(coerce_string(&Yaml::Integer(72)), "72");
        assert_eq!(coerce_string(&Yaml::Real("1.5".into())), "1.5");
        assert_eq!(coerce_string(&Yaml::Boolean(true)), "true");
        assert_eq!(coerce_string(&Yaml::Null), "");
        assert_eq!(coerce_string(&Yaml::Hash(Hash::new())), "");
    }

    #[test]
    fn test_coerce_boolean() {
        assert!(coerce_boolean(&Yaml::Boolean(true)));
        assert!(!coerce_boolean(&Yaml::Boolean(false)));
        assert!(coerce_boolean(&Yaml::String("True".into())));
        assert!(coerce_boolean(&Yaml::String("1".into())));
        assert!(coerce_boolean(&Yaml::Integer(1)));
        assert!(!coerce_boolean(&Yaml::Integer(2)));
        assert!(!coerce_boolean(&Yaml::String("on".into())));
    }
}
