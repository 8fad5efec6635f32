//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};
use quarto_pandoc_format::{FormatConfig, format_config_from_document};
use tracing::info;

/// Read the format configuration declared in a document, if any.
pub fn read_document_config(path: &Path) -> Result<Option<FormatConfig>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(format_config_from_document(&text))
}

pub fn execute(input: &Path) -> Result<()> {
    match read_document_config(input)? {
        Some(config) => println!("{}", serde_json::to_string_pretty(&config)?),
        None => info!(input = %input.display(), "No markdown format configuration found"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_document_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("doc.md");
        std::fs::write(&path, "<!-- -*- mode: gfm; wrap: 72 -*- -->\n\nHello\n").unwrap();

        let config = read_document_config(&path).unwrap().unwrap();
        assert_eq!(config.mode.as_deref(), Some("gfm"));
        assert_eq!(config.wrap.as_deref(), Some("72"));
    }

    #[test]
    fn test_read_document_without_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("doc.md");
        std::fs::write(&path, "# Plain\n").unwrap();
        assert!(read_document_config(&path).unwrap().is_none());
    }

    #[test]
    fn test_read_missing_document() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_document_config(&temp.path().join("missing.md")).unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }
}
