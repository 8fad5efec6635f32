/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * The Pandoc engine capability used during format resolution.
 */

//! The Pandoc engine capability.
//!
//! Format resolution only needs one thing from Pandoc: the extension list for
//! a base format, as printed by `pandoc --list-extensions=FORMAT`. The
//! [`PandocEngine`] trait abstracts that query so resolution can run against
//! a native pandoc binary, a server-side proxy, or a scripted engine in tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PandocError, Result};

/// Environment variable naming an explicit pandoc binary.
pub const PANDOC_ENV_VAR: &str = "QUARTO_PANDOC";

/// Query interface to the Pandoc conversion engine.
///
/// On native targets, async methods produce `Send` futures.
/// On WASM, futures are `?Send` (browser bridges are not `Send`).
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait PandocEngine: Send + Sync {
    /// List every extension Pandoc recognizes for `format`, with its default
    /// state, as a token string (`+name` / `-name`, typically one per line).
    async fn list_extensions(&self, format: &str) -> Result<String>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: PandocEngine + ?Sized> PandocEngine for Arc<T> {
    async fn list_extensions(&self, format: &str) -> Result<String> {
        (**self).list_extensions(format).await
    }
}

/// Find the pandoc binary on the system.
///
/// Searches in this order:
/// 1. `QUARTO_PANDOC` environment variable (path to the pandoc binary)
/// 2. System PATH via `which`
#[cfg(not(target_arch = "wasm32"))]
pub fn find_pandoc() -> Option<PathBuf> {
    find_pandoc_from(std::env::var(PANDOC_ENV_VAR).ok().as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn find_pandoc_from(override_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
        tracing::debug!(path = %path.display(), "{PANDOC_ENV_VAR} does not point to a file, searching PATH");
    }

    which::which("pandoc").ok()
}

/// Engine backed by a local pandoc binary.
#[derive(Debug, Clone)]
pub struct NativePandoc {
    binary: PathBuf,
}

impl NativePandoc {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Locate pandoc with [`find_pandoc`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn discover() -> Result<Self> {
        find_pandoc().map(Self::new).ok_or(PandocError::NotFound)
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl PandocEngine for NativePandoc {
    async fn list_extensions(&self, format: &str) -> Result<String> {
        tracing::trace!(binary = %self.binary.display(), format, "Listing pandoc extensions");

        let output = tokio::process::Command::new(&self.binary)
            .arg(format!("--list-extensions={format}"))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| PandocError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PandocError::failed(
                format,
                output.status.code(),
                stderr.trim(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
