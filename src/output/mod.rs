use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::extractors::CaptionEntry;

pub mod formatters;

pub use formatters::*;

/// Render entries in the requested format
pub fn render(
    entries: &[CaptionEntry],
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<String> {
    let content = match format {
        OutputFormat::Text => format_as_text(entries, include_timestamps),
        OutputFormat::Json => format_as_json(entries)?,
        OutputFormat::Srt => format_as_srt(entries),
        OutputFormat::Vtt => format_as_vtt(entries),
    };

    Ok(content)
}

/// Save captions to file
pub fn save_to_file(
    entries: &[CaptionEntry],
    path: &Path,
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(entries, format, include_timestamps)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print captions to console
pub fn print_to_console(
    entries: &[CaptionEntry],
    format: &OutputFormat,
    include_timestamps: bool,
) -> Result<()> {
    let content = render(entries, format, include_timestamps)?;
    println!("{}", content);
    Ok(())
}
