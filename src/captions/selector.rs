use crate::errors::CaptioneerError;
use crate::extractors::{CaptionSource, CaptionTrackList};

/// Choose the caption track to fetch.
///
/// With a requested language the first exact, case-sensitive match wins;
/// without one the platform's first track is used as-is.
pub fn select_caption_track<'a>(
    video_id: &str,
    tracks: &'a CaptionTrackList,
    requested_lang: Option<&str>,
) -> Result<&'a CaptionSource, CaptioneerError> {
    let available = tracks.tracks();
    let first = available
        .first()
        .ok_or_else(|| CaptioneerError::captions_not_available(video_id))?;

    let Some(lang) = requested_lang else {
        return Ok(first);
    };

    available
        .iter()
        .find(|track| track.language_code == lang)
        .ok_or_else(|| {
            CaptioneerError::language_not_available(lang, tracks.language_codes(), video_id)
        })
}
