//! Resolve command implementation

use anyhow::Result;
use quarto_pandoc_format::{
    FormatConfig, FormatSpec, FormatWarnings, NativePandoc, ResolvedFormat, resolve_format,
};
use tracing::{debug, warn};

use super::config::read_document_config;
use crate::ResolveArgs;

/// Execute the resolve command.
///
/// Document options are read first; `--mode` and `--extensions` override them.
pub fn execute(args: ResolveArgs) -> Result<()> {
    // pandoc runs as a tokio child process, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let resolved = runtime.block_on(run_resolve(&args))?;

    report_warnings(&resolved.warnings);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print!("{}", render_text(&resolved));
    }
    Ok(())
}

async fn run_resolve(args: &ResolveArgs) -> Result<ResolvedFormat> {
    let config = match &args.input {
        Some(input) => read_document_config(input)?,
        None => None,
    };
    let spec = build_spec(config, args);

    let pandoc = match &args.pandoc {
        Some(binary) => NativePandoc::new(binary),
        None => NativePandoc::discover()?,
    };
    debug!(
        pandoc = %pandoc.binary().display(),
        mode = %spec.requested_mode,
        extensions = %spec.requested_options,
        "Resolving format"
    );

    Ok(resolve_format(&pandoc, &spec).await?)
}

/// Merge command-line overrides into the document configuration.
fn build_spec(config: Option<FormatConfig>, args: &ResolveArgs) -> FormatSpec {
    let mut config = config.unwrap_or_default();
    if let Some(mode) = &args.mode {
        config.mode = Some(mode.clone());
    }
    if let Some(extensions) = &args.extensions {
        config.extensions = Some(extensions.clone());
    }
    FormatSpec::from_config(&config, args.math_in_code)
}

fn report_warnings(warnings: &FormatWarnings) {
    if !warnings.invalid_format.is_empty() {
        warn!(
            mode = %warnings.invalid_format,
            "Unknown markdown mode, using markdown"
        );
    }
    for extension in &warnings.invalid_options {
        warn!(extension = %extension, "Ignoring unknown markdown extension");
    }
}

fn render_text(resolved: &ResolvedFormat) -> String {
    let enabled: Vec<&str> = resolved.extensions.enabled().collect();
    format!(
        "format: {}\nbase: {}\nmode: {}\nfenced code blocks: {}\nenabled: {}\n",
        resolved.full_name,
        resolved.base_name,
        resolved.mode,
        if resolved.has_fenced_code_blocks() { "yes" } else { "no" },
        enabled.join(" "),
    )
}
