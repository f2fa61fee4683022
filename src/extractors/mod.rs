use serde::{Deserialize, Serialize};

pub mod content;
pub mod tracks;

pub use content::parse_caption_content;
pub use tracks::extract_caption_tracks;

/// One fetchable caption track advertised by the watch page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSource {
    /// URL of the raw caption payload
    #[serde(rename = "baseUrl")]
    pub base_url: String,

    /// Language code of the track (e.g. "en", "pt-BR")
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

/// Track metadata embedded in the watch page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrackList {
    #[serde(rename = "captionTracks", default, skip_serializing_if = "Option::is_none")]
    pub caption_tracks: Option<Vec<CaptionSource>>,
}

impl CaptionTrackList {
    /// Tracks in platform order; empty when none are advertised
    pub fn tracks(&self) -> &[CaptionSource] {
        self.caption_tracks.as_deref().unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.tracks().is_empty()
    }

    /// Language codes of every track, in track order
    pub fn language_codes(&self) -> Vec<String> {
        self.tracks()
            .iter()
            .map(|track| track.language_code.clone())
            .collect()
    }
}

/// A single time-aligned caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Caption text as delivered, entities left encoded
    pub text: String,

    /// Display span in seconds
    pub duration: f64,

    /// Start time in seconds from playback start
    pub offset: f64,

    /// Language the entry was fetched in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl CaptionEntry {
    /// End time in seconds
    pub fn end(&self) -> f64 {
        self.offset + self.duration
    }
}
