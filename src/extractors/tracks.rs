use serde::Deserialize;

use super::CaptionTrackList;
use crate::errors::CaptioneerError;

/// Marker key preceding the embedded captions JSON
const CAPTIONS_MARKER: &str = "\"captions\":";

/// Marker key of the field that always follows the captions JSON
const VIDEO_DETAILS_MARKER: &str = ",\"videoDetails";

#[derive(Debug, Deserialize)]
struct CaptionsResponse {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: Option<CaptionTrackList>,
}

/// Extract the caption track list embedded in a watch page body.
///
/// Fails with `CAPTIONS_DISABLED` when the page carries no captions section and
/// with `PARSE_ERROR` when the section is not the expected JSON object.
pub fn extract_caption_tracks(
    page: &str,
    video_id: &str,
) -> Result<CaptionTrackList, CaptioneerError> {
    let section = page
        .split(CAPTIONS_MARKER)
        .nth(1)
        .ok_or_else(|| CaptioneerError::captions_disabled(video_id))?;

    let raw_json: String = section
        .split(VIDEO_DETAILS_MARKER)
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    let response: CaptionsResponse = serde_json::from_str(&raw_json).map_err(|e| {
        tracing::debug!("Caption metadata for {} is not valid JSON: {}", video_id, e);
        CaptioneerError::parse("Failed to parse caption tracks").with_source(e)
    })?;

    Ok(response.renderer.unwrap_or_else(|| CaptionTrackList {
        caption_tracks: Some(Vec::new()),
    }))
}
