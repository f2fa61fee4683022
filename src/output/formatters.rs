use anyhow::Result;

use crate::extractors::CaptionEntry;
use crate::utils::{format_short_timestamp, format_timestamp};

/// Plain text, one entry per line
pub fn format_as_text(entries: &[CaptionEntry], include_timestamps: bool) -> String {
    entries
        .iter()
        .map(|entry| {
            if include_timestamps {
                format!("[{}] {}", format_short_timestamp(entry.offset), entry.text)
            } else {
                entry.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed JSON array of entries
pub fn format_as_json(entries: &[CaptionEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// SubRip subtitles
pub fn format_as_srt(entries: &[CaptionEntry]) -> String {
    let mut output = String::new();

    for (index, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            index + 1,
            format_timestamp(entry.offset, ','),
            format_timestamp(entry.end(), ','),
            entry.text
        ));
    }

    output
}

/// WebVTT subtitles
pub fn format_as_vtt(entries: &[CaptionEntry]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for entry in entries {
        output.push_str(&format!(
            "{} --> {}\n{}\n\n",
            format_timestamp(entry.offset, '.'),
            format_timestamp(entry.end(), '.'),
            entry.text
        ));
    }

    output
}
