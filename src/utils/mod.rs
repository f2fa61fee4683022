use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a canonical YouTube video identifier
pub const VIDEO_ID_LENGTH: usize = 11;

/// Recognizes watch, embed, /v/, /e/, channel-style and youtu.be links
static YOUTUBE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("Failed to compile YouTube URL regex")
});

/// Extract the video identifier from a raw id or a YouTube URL.
///
/// Any 11-character input is taken as a literal identifier without checking
/// its characters.
pub fn normalize_video_id(input: &str) -> Option<String> {
    if input.chars().count() == VIDEO_ID_LENGTH {
        return Some(input.to_string());
    }

    YOUTUBE_URL_REGEX
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check if the input normalizes to a video identifier
pub fn is_valid_video_id(input: &str) -> bool {
    normalize_video_id(input).is_some()
}

/// Build the watch page URL for a normalized identifier
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", urlencoding::encode(video_id))
}

/// Format seconds as `HH:MM:SS{sep}mmm`
pub fn format_timestamp(seconds: f64, separator: char) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, separator, millis)
}

/// Format seconds as `MM:SS.mmm`, growing an hour field only when needed
pub fn format_short_timestamp(seconds: f64) -> String {
    let total_millis = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, millis)
    }
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u64;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_raw_id_passes_through() {
        assert_eq!(normalize_video_id(ID), Some(ID.to_string()));
        // no charset validation for 11-character input
        assert_eq!(normalize_video_id("!!!!!!!!!!!"), Some("!!!!!!!!!!!".to_string()));
    }

    #[test]
    fn test_url_shapes() {
        let urls = [
            format!("https://www.youtube.com/watch?v={}", ID),
            format!("https://youtube.com/watch?feature=share&v={}", ID),
            format!("https://www.youtube.com/embed/{}", ID),
            format!("https://www.youtube.com/v/{}?version=3", ID),
            format!("https://www.youtube.com/e/{}", ID),
            format!("https://youtu.be/{}", ID),
            format!("https://youtu.be/{}?t=42", ID),
            format!("HTTPS://WWW.YOUTUBE.COM/watch?v={}", ID),
            format!("https://m.youtube.com/watch?v={}&list=PL123", ID),
        ];

        for url in &urls {
            assert_eq!(normalize_video_id(url), Some(ID.to_string()), "url: {}", url);
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(normalize_video_id("invalid"), None);
        assert_eq!(normalize_video_id(""), None);
        assert_eq!(normalize_video_id("https://vimeo.com/123456789012"), None);
        assert_eq!(normalize_video_id("https://www.youtube.com/watch?v=short"), None);
        assert!(!is_valid_video_id("invalid"));
        assert!(is_valid_video_id(ID));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(watch_url(ID), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0, ','), "00:00:00,000");
        assert_eq!(format_timestamp(61.5, ','), "00:01:01,500");
        assert_eq!(format_timestamp(3723.042, '.'), "01:02:03.042");
    }

    #[test]
    fn test_format_short_timestamp() {
        assert_eq!(format_short_timestamp(1.25), "00:01.250");
        assert_eq!(format_short_timestamp(3661.0), "1:01:01.000");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
    }
}
