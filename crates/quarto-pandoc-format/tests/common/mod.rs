/*
 * common/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Scripted Pandoc engine shared by the integration tests.
 */

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use quarto_pandoc_format::{PandocEngine, PandocError, Result};

pub const MARKDOWN_EXTENSIONS: &str = "\
-abbreviations
+all_symbols_escapable
-ascii_identifiers
+auto_identifiers
-autolink_bare_uris
+backtick_code_blocks
+definition_lists
-emoji
+fenced_code_blocks
+footnotes
-gfm_auto_identifiers
-intraword_underscores
-lists_without_preceding_blankline
+pipe_tables
+raw_html
-shortcut_reference_links
+smart
-space_in_atx_header
+strikeout
+task_lists
+tex_math_dollars
+yaml_metadata_block
";

pub const MARKDOWN_STRICT_EXTENSIONS: &str = "\
-abbreviations
-all_symbols_escapable
-ascii_identifiers
-auto_identifiers
-autolink_bare_uris
-backtick_code_blocks
-definition_lists
-emoji
-fenced_code_blocks
-footnotes
-gfm_auto_identifiers
-intraword_underscores
-lists_without_preceding_blankline
-pipe_tables
+raw_html
+shortcut_reference_links
-smart
-space_in_atx_header
-strikeout
-task_lists
-tex_math_dollars
-yaml_metadata_block
";

/// gfm knows fewer extensions than markdown_strict (no definition lists)
pub const GFM_EXTENSIONS: &str = "\
+all_symbols_escapable
+auto_identifiers
+autolink_bare_uris
+backtick_code_blocks
+emoji
+fenced_code_blocks
+gfm_auto_identifiers
+intraword_underscores
+lists_without_preceding_blankline
+pipe_tables
+raw_html
+shortcut_reference_links
-smart
+space_in_atx_header
+strikeout
+task_lists
";

pub const COMMONMARK_EXTENSIONS: &str = "\
-autolink_bare_uris
-emoji
-pipe_tables
+raw_html
-smart
-strikeout
-task_lists
";

/// An engine answering from fixed extension lists, recording every query.
pub struct ScriptedPandoc {
    formats: HashMap<&'static str, &'static str>,
    fail_on: Option<&'static str>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedPandoc {
    pub fn new() -> Self {
        let formats = HashMap::from([
            ("markdown", MARKDOWN_EXTENSIONS),
            ("markdown_phpextra", MARKDOWN_STRICT_EXTENSIONS),
            ("markdown_github", GFM_EXTENSIONS),
            ("markdown_mmd", MARKDOWN_STRICT_EXTENSIONS),
            ("markdown_strict", MARKDOWN_STRICT_EXTENSIONS),
            ("gfm", GFM_EXTENSIONS),
            ("commonmark", COMMONMARK_EXTENSIONS),
        ]);
        Self {
            formats,
            fail_on: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fail when asked about `format`.
    pub fn failing_on(mut self, format: &'static str) -> Self {
        self.fail_on = Some(format);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PandocEngine for ScriptedPandoc {
    async fn list_extensions(&self, format: &str) -> Result<String> {
        self.queries.lock().unwrap().push(format.to_string());
        if self.fail_on == Some(format) {
            return Err(PandocError::failed(format, Some(1), "pandoc crashed"));
        }
        self.formats
            .get(format)
            .map(|extensions| extensions.to_string())
            .ok_or_else(|| PandocError::failed(format, Some(64), format!("Unknown format {format}")))
    }
}
