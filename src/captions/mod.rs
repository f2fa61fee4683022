use std::sync::Arc;

use crate::config::{Config, DEFAULT_USER_AGENT};
use crate::errors::CaptioneerError;
use crate::extractors::{
    extract_caption_tracks, parse_caption_content, CaptionEntry, CaptionSource, CaptionTrackList,
};
use crate::http::{HttpClient, ReqwestClient, RequestOptions};
use crate::utils::{normalize_video_id, watch_url};

pub mod selector;

pub use selector::select_caption_track;

/// Present on the bot-challenge page served instead of the video
const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

/// Present on every watch page of an existing video
const PLAYABILITY_MARKER: &str = "\"playabilityStatus\":";

/// Per-call options for [`Captioneer::fetch_captions`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOptions {
    /// Caption language; the first available track is used when unset
    pub lang: Option<String>,
}

impl FetchOptions {
    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
        }
    }

    fn requested_lang(&self) -> Option<&str> {
        self.lang.as_deref().filter(|lang| !lang.is_empty())
    }
}

/// Caption fetching pipeline.
///
/// Each call runs normalize, page fetch, track extraction, track selection,
/// caption fetch and parsing in order. Nothing is shared between calls
/// except the transport.
pub struct Captioneer {
    http_client: Arc<dyn HttpClient>,
    user_agent: String,
}

impl Captioneer {
    /// Create a pipeline backed by the default reqwest transport
    pub fn new() -> Self {
        Self::with_client(Arc::new(ReqwestClient::new()))
    }

    /// Create a pipeline over an injected transport
    pub fn with_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create a pipeline with transport settings taken from configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let client = ReqwestClient::from_config(&config.http)?;
        Ok(Self::with_client(Arc::new(client)).with_user_agent(&config.http.user_agent))
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Fetch and parse the captions of a video given by id or URL
    pub async fn fetch_captions(
        &self,
        video_id_or_url: &str,
        options: &FetchOptions,
    ) -> Result<Vec<CaptionEntry>, CaptioneerError> {
        let lang = options.requested_lang();
        let video_id = resolve_video_id(video_id_or_url)?;
        let request = self.request_options(lang);

        let page = self.fetch_video_page(&video_id, &request).await?;
        let tracks = extract_caption_tracks(&page, &video_id)?;
        let track = select_caption_track(&video_id, &tracks, lang)?;
        tracing::debug!("Selected {} caption track for {}", track.language_code, video_id);

        let content = self.fetch_caption_content(&video_id, track, &request).await?;
        let entries = parse_caption_content(&content, lang.unwrap_or(track.language_code.as_str()))?;

        tracing::info!("Fetched {} caption entries for {}", entries.len(), video_id);
        Ok(entries)
    }

    /// List the caption tracks a video advertises, in platform order
    pub async fn list_caption_tracks(
        &self,
        video_id_or_url: &str,
        options: &FetchOptions,
    ) -> Result<CaptionTrackList, CaptioneerError> {
        let video_id = resolve_video_id(video_id_or_url)?;
        let request = self.request_options(options.requested_lang());

        let page = self.fetch_video_page(&video_id, &request).await?;
        extract_caption_tracks(&page, &video_id)
    }

    fn request_options(&self, lang: Option<&str>) -> RequestOptions {
        let options = RequestOptions::default().with_header("User-Agent", self.user_agent.as_str());

        match lang {
            Some(lang) => options.with_header("Accept-Language", lang),
            None => options,
        }
    }

    async fn fetch_video_page(
        &self,
        video_id: &str,
        request: &RequestOptions,
    ) -> Result<String, CaptioneerError> {
        tracing::debug!("Fetching watch page for {}", video_id);

        let response = self
            .http_client
            .get(&watch_url(video_id), request)
            .await
            .map_err(|e| classify_transport_error(e, "Failed to fetch video page"))?;

        if !response.ok {
            tracing::warn!("Watch page for {} returned HTTP {}", video_id, response.status);
        }

        let page = response.into_text();

        if page.contains(RECAPTCHA_MARKER) {
            return Err(CaptioneerError::too_many_requests());
        }

        if !page.contains(PLAYABILITY_MARKER) {
            return Err(CaptioneerError::video_unavailable(video_id));
        }

        Ok(page)
    }

    async fn fetch_caption_content(
        &self,
        video_id: &str,
        track: &CaptionSource,
        request: &RequestOptions,
    ) -> Result<String, CaptioneerError> {
        tracing::debug!("Fetching {} captions for {}", track.language_code, video_id);

        let response = self
            .http_client
            .get(&track.base_url, request)
            .await
            .map_err(|e| classify_transport_error(e, "Failed to fetch captions"))?;

        if !response.ok {
            return Err(CaptioneerError::captions_not_available(video_id)
                .with_requested_language(&track.language_code));
        }

        Ok(response.into_text())
    }
}

impl Default for Captioneer {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_video_id(input: &str) -> Result<String, CaptioneerError> {
    normalize_video_id(input).ok_or_else(|| CaptioneerError::invalid_video_id(input))
}

/// Pass taxonomy failures through untouched and wrap anything else
fn classify_transport_error(error: anyhow::Error, context: &str) -> CaptioneerError {
    match error.downcast::<CaptioneerError>() {
        Ok(error) => error,
        Err(other) => CaptioneerError::network(context).with_source(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::http::{HttpResponse, MockHttpClient};

    const ID: &str = "dQw4w9WgXcQ";

    fn page(tracks_json: &str) -> String {
        format!(
            "<html>\"captions\":{{\"playerCaptionsTracklistRenderer\":{{\"captionTracks\":[{}]}}}},\"videoDetails\":{{}},\"playabilityStatus\":{{\"status\":\"OK\"}}</html>",
            tracks_json
        )
    }

    #[tokio::test]
    async fn test_sends_headers_and_fetches_selected_track() {
        let mut mock = MockHttpClient::new();
        let watch_page = page(
            r#"{"baseUrl":"http://captions.en.url","languageCode":"en"},{"baseUrl":"http://captions.es.url","languageCode":"es"}"#,
        );

        mock.expect_get()
            .withf(|url, options| {
                url.ends_with("watch?v=dQw4w9WgXcQ")
                    && options.headers.get("Accept-Language").map(|v| v.as_str()) == Some("es")
                    && options.headers.get("User-Agent").map(|v| v.as_str()) == Some("test-agent")
            })
            .times(1)
            .returning(move |_, _| Ok(HttpResponse::new(200, watch_page.clone())));
        mock.expect_get()
            .withf(|url, _| url.starts_with("http://captions.es.url"))
            .times(1)
            .returning(|_, _| {
                Ok(HttpResponse::new(200, r#"<text start="0.5" dur="1.5">Hola</text>"#))
            });

        let captioneer = Captioneer::with_client(Arc::new(mock)).with_user_agent("test-agent");
        let entries = captioneer
            .fetch_captions(ID, &FetchOptions::with_lang("es"))
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "Hola");
        assert_eq!(entries[0].lang.as_deref(), Some("es"));
    }

    #[tokio::test]
    async fn test_no_accept_language_without_lang() {
        let mut mock = MockHttpClient::new();
        let watch_page = page(r#"{"baseUrl":"http://captions.de.url","languageCode":"de"}"#);

        mock.expect_get()
            .withf(|url, options| {
                url.contains("youtube.com/watch") && !options.headers.contains_key("Accept-Language")
            })
            .times(1)
            .returning(move |_, _| Ok(HttpResponse::new(200, watch_page.clone())));
        mock.expect_get()
            .withf(|url, _| url.starts_with("http://captions.de.url"))
            .times(1)
            .returning(|_, _| Ok(HttpResponse::new(200, r#"<text start="0" dur="1">Hallo</text>"#)));

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let entries = captioneer
            .fetch_captions(ID, &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(entries[0].lang.as_deref(), Some("de"));
    }

    #[tokio::test]
    async fn test_invalid_id_never_reaches_transport() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().times(0);

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let error = captioneer
            .fetch_captions("invalid", &FetchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidVideoId);
        assert_eq!(error.details().video_id.as_deref(), Some("invalid"));
    }

    #[tokio::test]
    async fn test_foreign_transport_error_becomes_network_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .returning(|_, _| Err(anyhow::anyhow!("connection reset by peer")));

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let error = captioneer
            .fetch_captions(ID, &FetchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Network);
        assert_eq!(error.message(), "Network error: Failed to fetch video page");
        assert_eq!(
            error.details().original_error.as_deref(),
            Some("connection reset by peer")
        );
    }

    #[tokio::test]
    async fn test_taxonomy_transport_error_passes_through() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .returning(|_, _| Err(CaptioneerError::rate_limited("HTTP 429").into()));

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let error = captioneer
            .fetch_captions(ID, &FetchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Network);
        assert_eq!(error.message(), "Network error: Rate limit exceeded: HTTP 429");
        assert!(error.details().original_error.is_none());
    }

    #[tokio::test]
    async fn test_caption_fetch_not_ok() {
        let mut mock = MockHttpClient::new();
        let watch_page = page(r#"{"baseUrl":"http://captions.en.url","languageCode":"en"}"#);

        mock.expect_get()
            .withf(|url, _| url.contains("youtube.com/watch"))
            .returning(move |_, _| Ok(HttpResponse::new(200, watch_page.clone())));
        mock.expect_get()
            .withf(|url, _| url.starts_with("http://captions.en.url"))
            .returning(|_, _| Ok(HttpResponse::new(404, "")));

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let error = captioneer
            .fetch_captions(ID, &FetchOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::CaptionsNotAvailable);
        assert_eq!(error.details().video_id.as_deref(), Some(ID));
        assert_eq!(error.details().requested_language.as_deref(), Some("en"));
    }

    #[tokio::test]
    async fn test_list_caption_tracks() {
        let mut mock = MockHttpClient::new();
        let watch_page = page(
            r#"{"baseUrl":"http://a","languageCode":"en"},{"baseUrl":"http://b","languageCode":"ja"}"#,
        );
        mock.expect_get()
            .times(1)
            .returning(move |_, _| Ok(HttpResponse::new(200, watch_page.clone())));

        let captioneer = Captioneer::with_client(Arc::new(mock));
        let tracks = captioneer
            .list_caption_tracks(&format!("https://youtu.be/{}", ID), &FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(tracks.language_codes(), vec!["en", "ja"]);
    }

    #[test]
    fn test_empty_lang_counts_as_unset() {
        let options = FetchOptions::with_lang("");
        assert_eq!(options.requested_lang(), None);
        assert_eq!(FetchOptions::with_lang("en").requested_lang(), Some("en"));
    }
}
