//! Captioneer - fetch YouTube caption tracks as time-aligned entries
//!
//! This library reads the caption metadata embedded in a video's watch page,
//! picks a track by language, downloads the raw caption payload and parses it
//! into [`CaptionEntry`] values. Every failure is a [`CaptioneerError`] with a
//! machine-checkable [`ErrorKind`].

pub mod captions;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod output;
pub mod utils;

pub use captions::{Captioneer, FetchOptions};
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use errors::{has_error_code, is_captioneer_error, CaptioneerError, ErrorDetails, ErrorKind};
pub use extractors::{CaptionEntry, CaptionSource, CaptionTrackList};
pub use http::{HttpClient, HttpResponse, ReqwestClient, RequestOptions};
pub use utils::{is_valid_video_id, normalize_video_id};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;
