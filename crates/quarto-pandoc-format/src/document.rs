/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Extraction of format configuration from document source.
 */

//! Extraction of [`FormatConfig`] from document source.
//!
//! Configuration is looked up in this order:
//!
//! 1. The first YAML metadata block: `editor_options.markdown`, plus any
//!    `md_extensions` declared under `output` (R Markdown output formats),
//!    which is prepended to the extensions.
//! 2. A marker comment on a line of its own, anywhere in the document:
//!
//!    ```markdown
//!    <!-- -*- mode: gfm; extensions: +emoji -*- -->
//!    ```

use comrak::nodes::NodeValue;
use comrak::{Arena, Options, parse_document};
use once_cell::sync::Lazy;
use regex::Regex;
use yaml_rust2::{Yaml, YamlLoader};

use crate::config::{FormatConfig, coerce_string, find_key, yaml_get, yaml_path};

static MARKER_COMMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^<!--\s+-\*-(.*?)-\*-\s+-->\s*$").expect("valid marker comment regex")
});

/// Read format configuration from a document, YAML first, then the marker comment.
pub fn format_config_from_document(text: &str) -> Option<FormatConfig> {
    format_config_from_yaml(text).or_else(|| format_config_from_comment(text))
}

/// Read format configuration from the document's first YAML metadata block.
///
/// Returns `None` if there is no block, it is not a YAML mapping, or it
/// declares neither `editor_options.markdown` nor `output.*.md_extensions`.
pub fn format_config_from_yaml(text: &str) -> Option<FormatConfig> {
    let block = first_yaml_block(text)?;
    let yaml = match YamlLoader::load_from_str(block) {
        Ok(docs) => docs.into_iter().next()?,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring unparseable YAML metadata block");
            return None;
        }
    };
    yaml.as_hash()?;

    let md_extensions = yaml_get(&yaml, "output")
        .and_then(|output| find_key(output, "md_extensions"))
        .map(coerce_string)
        .filter(|extensions| !extensions.is_empty());

    let markdown_options = yaml_path(&yaml, &["editor_options", "markdown"])
        .filter(|options| matches!(options, Yaml::Hash(_)))
        .map(FormatConfig::from_yaml);

    if md_extensions.is_none() && markdown_options.is_none() {
        return None;
    }

    let mut config = markdown_options.unwrap_or_default();
    if let Some(md_extensions) = md_extensions {
        let extensions = config.extensions.take().unwrap_or_default();
        config.extensions = Some(md_extensions + &extensions);
    }
    Some(config)
}

/// Read format configuration from the first `<!-- -*- ... -*- -->` comment.
///
/// The document is parsed as CommonMark and searched depth-first; the search
/// stops at the first HTML block holding a marker comment on a line of its
/// own. Comments inline in a paragraph are not markers.
pub fn format_config_from_comment(text: &str) -> Option<FormatConfig> {
    let arena = Arena::new();
    let root = parse_document(&arena, text, &Options::default());

    let content = root
        .descendants()
        .find_map(|node| match &node.data.borrow().value {
            NodeValue::HtmlBlock(block) => marker_comment_content(&block.literal),
            _ => None,
        })?;

    Some(FormatConfig::from_pairs(parse_marker_fields(&content)))
}

/// The text between the `-*-` markers of a marker comment.
fn marker_comment_content(html: &str) -> Option<String> {
    MARKER_COMMENT_RE
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|content| content.as_str().to_string())
}

/// Split `key: value; key2: value2` into trimmed pairs.
///
/// Fields are split on the first `:`; fields without one are skipped.
fn parse_marker_fields(content: &str) -> Vec<(String, String)> {
    content
        .split(';')
        .filter_map(|field| field.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Find the first Pandoc YAML metadata block and return its contents.
///
/// A block opens with a `---` line that is not followed by a blank line (and,
/// away from the top of the document, is preceded by one), and closes with a
/// `---` or `...` line. The returned slice excludes both delimiters.
pub fn first_yaml_block(text: &str) -> Option<&str> {
    let lines = line_spans(text);

    for (index, &(_, line)) in lines.iter().enumerate() {
        if line.trim_end() != "---" {
            continue;
        }
        let preceded_by_blank = index == 0 || lines[index - 1].1.trim().is_empty();
        let Some(&(content_start, first)) = lines.get(index + 1) else {
            break;
        };
        if !preceded_by_blank || first.trim().is_empty() {
            continue;
        }

        let close = lines[index + 1..]
            .iter()
            .position(|(_, line)| matches!(line.trim_end(), "---" | "..."));
        if let Some(offset) = close {
            let (content_end, _) = lines[index + 1 + offset];
            return Some(&text[content_start..content_end]);
        }
    }

    None
}

/// Byte offset and content (without line terminator) of every line.
fn line_spans(text: &str) -> Vec<(usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line.trim_end_matches(['\n', '\r']))
        })
        .collect()
}
