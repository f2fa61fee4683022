use once_cell::sync::Lazy;
use regex::Regex;

use super::CaptionEntry;
use crate::errors::CaptioneerError;

static CAPTION_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<text start="([^"]*)" dur="([^"]*)">([^<]*)</text>"#)
        .expect("Failed to compile caption tag regex")
});

static LEADING_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("Failed to compile leading number regex")
});

/// Parse a raw caption payload into entries, in document order.
///
/// Text is kept verbatim. A payload with no `<text>` tags is a parse failure,
/// even when it is empty.
pub fn parse_caption_content(
    content: &str,
    language_code: &str,
) -> Result<Vec<CaptionEntry>, CaptioneerError> {
    let entries = CAPTION_TAG_REGEX
        .captures_iter(content)
        .map(|caps| -> Result<CaptionEntry, CaptioneerError> {
            Ok(CaptionEntry {
                text: caps[3].to_string(),
                duration: parse_seconds(&caps[2], "dur")?,
                offset: parse_seconds(&caps[1], "start")?,
                lang: Some(language_code.to_string()),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if entries.is_empty() {
        return Err(CaptioneerError::parse("No caption entries found in content"));
    }

    tracing::debug!("Parsed {} caption entries ({})", entries.len(), language_code);
    Ok(entries)
}

/// Read the leading number of an attribute, ignoring any trailing unit or junk
fn parse_seconds(value: &str, attribute: &str) -> Result<f64, CaptioneerError> {
    LEADING_NUMBER_REGEX
        .find(value.trim_start())
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .ok_or_else(|| {
            CaptioneerError::parse(format!("Invalid {} attribute: {:?}", attribute, value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_parses_entries_in_order() {
        let content = r#"<text start="0.0" dur="1.0">Hello</text><text start="1.0" dur="2.0">World</text>"#;
        let entries = parse_caption_content(content, "en").unwrap();

        assert_eq!(
            entries,
            vec![
                CaptionEntry {
                    text: "Hello".to_string(),
                    duration: 1.0,
                    offset: 0.0,
                    lang: Some("en".to_string()),
                },
                CaptionEntry {
                    text: "World".to_string(),
                    duration: 2.0,
                    offset: 1.0,
                    lang: Some("en".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let content = concat!(
            r#"<?xml version="1.0" encoding="utf-8" ?><transcript>"#,
            r#"<text start="12.34" dur="5.6">  it&amp;#39;s   here </text>"#,
            "\n",
            r#"<text start="17.94" dur="0.5"></text>"#,
            "</transcript>"
        );
        let entries = parse_caption_content(content, "en").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "  it&amp;#39;s   here ");
        assert_eq!(entries[0].offset, 12.34);
        assert_eq!(entries[0].duration, 5.6);
        assert_eq!(entries[1].text, "");
    }

    #[test]
    fn test_empty_content_is_parse_error() {
        let error = parse_caption_content("", "en").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Parse);
        assert_eq!(
            error.message(),
            "Failed to parse response: No caption entries found in content"
        );
    }

    #[test]
    fn test_unmatched_markup_is_parse_error() {
        let content = r#"<transcript><p t="0" d="1">other format</p></transcript>"#;
        assert!(parse_caption_content(content, "en").is_err());
    }

    #[test]
    fn test_attributes_use_leading_number() {
        let content = r#"<text start=" 1.5s" dur="2e0 seconds">Hello</text><text start=".25" dur="3.">Hi</text>"#;
        let entries = parse_caption_content(content, "en").unwrap();

        assert_eq!(entries[0].offset, 1.5);
        assert_eq!(entries[0].duration, 2.0);
        assert_eq!(entries[1].offset, 0.25);
        assert_eq!(entries[1].duration, 3.0);
    }

    #[test]
    fn test_non_numeric_attribute_is_parse_error() {
        let content = r#"<text start="abc" dur="1.0">Hello</text>"#;
        let error = parse_caption_content(content, "en").unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Parse);
        assert!(error.message().contains("start"));
    }
}
