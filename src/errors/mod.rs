use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Boxed cause attached to a failure for diagnostics
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure causes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Generic,
    TooManyRequests,
    VideoUnavailable,
    CaptionsDisabled,
    CaptionsNotAvailable,
    LanguageNotAvailable,
    InvalidVideoId,
    #[serde(rename = "NETWORK_ERROR")]
    Network,
    #[serde(rename = "PARSE_ERROR")]
    Parse,
}

impl ErrorKind {
    /// Machine-checkable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Generic => "GENERIC",
            ErrorKind::TooManyRequests => "TOO_MANY_REQUESTS",
            ErrorKind::VideoUnavailable => "VIDEO_UNAVAILABLE",
            ErrorKind::CaptionsDisabled => "CAPTIONS_DISABLED",
            ErrorKind::CaptionsNotAvailable => "CAPTIONS_NOT_AVAILABLE",
            ErrorKind::LanguageNotAvailable => "LANGUAGE_NOT_AVAILABLE",
            ErrorKind::InvalidVideoId => "INVALID_VIDEO_ID",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Parse => "PARSE_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured diagnostics carried by every failure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Raw input or normalized video identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    /// Language the caller asked for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_language: Option<String>,

    /// Every track language, in track order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_languages: Option<Vec<String>>,

    /// Rendered form of the underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_error: Option<String>,
}

/// Failure raised anywhere in the caption pipeline.
///
/// Every instance carries a fixed [`ErrorKind`]; branch on [`CaptioneerError::kind`],
/// [`is_captioneer_error`] or [`has_error_code`], never on the message text.
#[derive(thiserror::Error, Debug)]
#[error("[{kind}] {message}")]
pub struct CaptioneerError {
    kind: ErrorKind,
    message: String,
    timestamp: DateTime<Utc>,
    details: ErrorDetails,
    #[source]
    source: Option<BoxError>,
}

/// Plain record produced by [`CaptioneerError::to_json`]
#[derive(Serialize)]
struct ErrorRecord<'a> {
    code: ErrorKind,
    message: &'a str,
    timestamp: &'a DateTime<Utc>,
    #[serde(flatten)]
    details: &'a ErrorDetails,
}

impl CaptioneerError {
    /// Base constructor; the specific constructors below should be preferred
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
            details: ErrorDetails::default(),
            source: None,
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(message, ErrorKind::Generic)
    }

    pub fn too_many_requests() -> Self {
        Self::new(
            "YouTube is receiving too many requests from this IP and now requires solving a captcha to continue",
            ErrorKind::TooManyRequests,
        )
    }

    pub fn video_unavailable(video_id: &str) -> Self {
        Self::new(
            format!("The video is no longer available ({})", video_id),
            ErrorKind::VideoUnavailable,
        )
        .with_video_id(video_id)
    }

    pub fn captions_disabled(video_id: &str) -> Self {
        Self::new(
            format!("Transcript is disabled on this video ({})", video_id),
            ErrorKind::CaptionsDisabled,
        )
        .with_video_id(video_id)
    }

    pub fn captions_not_available(video_id: &str) -> Self {
        Self::new(
            format!("No transcripts are available for this video ({})", video_id),
            ErrorKind::CaptionsNotAvailable,
        )
        .with_video_id(video_id)
    }

    pub fn language_not_available(lang: &str, available: Vec<String>, video_id: &str) -> Self {
        let mut error = Self::new(
            format!(
                "No transcripts are available in {} for this video ({}). Available languages: {}",
                lang,
                video_id,
                available.join(", ")
            ),
            ErrorKind::LanguageNotAvailable,
        )
        .with_video_id(video_id);
        error.details.requested_language = Some(lang.to_string());
        error.details.available_languages = Some(available);
        error
    }

    pub fn invalid_video_id(input: &str) -> Self {
        Self::new(
            format!("Invalid YouTube video ID or URL: {}", input),
            ErrorKind::InvalidVideoId,
        )
        .with_video_id(input)
    }

    pub fn network(message: impl fmt::Display) -> Self {
        Self::new(format!("Network error: {}", message), ErrorKind::Network)
    }

    /// Transport request exceeded its deadline
    pub fn timeout(message: impl fmt::Display) -> Self {
        Self::network(format!("Request timed out: {}", message))
    }

    /// Platform answered with HTTP 429
    pub fn rate_limited(message: impl fmt::Display) -> Self {
        Self::network(format!("Rate limit exceeded: {}", message))
    }

    pub fn parse(message: impl fmt::Display) -> Self {
        Self::new(format!("Failed to parse response: {}", message), ErrorKind::Parse)
    }

    /// Attach the underlying cause, recording its rendering in the details
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        let source = source.into();
        self.details.original_error = Some(source.to_string());
        self.source = Some(source);
        self
    }

    fn with_video_id(mut self, video_id: &str) -> Self {
        self.details.video_id = Some(video_id.to_string());
        self
    }

    pub(crate) fn with_requested_language(mut self, lang: &str) -> Self {
        self.details.requested_language = Some(lang.to_string());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Whether this failure carries the given kind
    pub fn has_code(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    /// Convert to a plain record for logging or serialization
    pub fn to_json(&self) -> serde_json::Value {
        let record = ErrorRecord {
            code: self.kind,
            message: &self.message,
            timestamp: &self.timestamp,
            details: &self.details,
        };
        serde_json::to_value(record).unwrap_or(serde_json::Value::Null)
    }
}

/// Check whether an arbitrary error belongs to the captioneer taxonomy
pub fn is_captioneer_error(error: &(dyn std::error::Error + 'static)) -> bool {
    error.is::<CaptioneerError>()
}

/// Check whether an arbitrary error is a captioneer failure of the given kind
pub fn has_error_code(error: &(dyn std::error::Error + 'static), kind: ErrorKind) -> bool {
    error
        .downcast_ref::<CaptioneerError>()
        .is_some_and(|e| e.has_code(kind))
}
