//! Final dump of the assembled catalog tree.

use anyhow::{Context, Result};
use shared::Category;
use std::io::Write;

/// Output format for the tree dump
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented outline
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Write the tree in the requested format
pub fn write_tree<W: Write>(out: &mut W, categories: &[Category], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_outline(out, categories),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, categories)
                .context("Failed to serialize catalog tree")?;
            writeln!(out).context("Failed to write catalog tree")
        }
    }
}

fn write_outline<W: Write>(out: &mut W, categories: &[Category]) -> Result<()> {
    for category in categories {
        writeln!(out, "{} [{}]", category.name, category.id)?;
        for item in &category.items {
            writeln!(out, "  {} [{}]", item.name, item.id)?;
            for lang in &item.languages {
                writeln!(out, "    {} [{}]", lang.lang, lang.id)?;
                for entry in &lang.entries {
                    writeln!(
                        out,
                        "      {} [{}] posted {} url={}",
                        entry.name, entry.id, entry.post, entry.url
                    )?;
                    match &entry.detail {
                        Some(detail) => {
                            writeln!(
                                out,
                                "        file={} sha1={} size={} published={}",
                                detail.file_name, detail.sha1, detail.size, detail.published
                            )?;
                            writeln!(out, "        {}", detail.download_url)?;
                        }
                        None => writeln!(out, "        (no detail)")?,
                    }
                }
            }
        }
    }
    Ok(())
}
