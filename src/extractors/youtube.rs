use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Everything after the last `=` in the URL. Mirrors the upstream
/// behavior for `...watch?v=<id>` links; a URL without `=` yields the
/// whole string, which is a known fragility of the contract rather than
/// something to correct here.
pub fn video_id_from_url(url: &str) -> &str {
    match url.rfind('=') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}

/// One caption line of a transcript, in playback order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub duration: f64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> AppResult<Vec<CaptionLine>>;
}

pub struct TranscriptExtractor {
    fetcher: Arc<dyn TranscriptFetcher>,
}

impl TranscriptExtractor {
    pub fn new(fetcher: Arc<dyn TranscriptFetcher>) -> Self {
        Self { fetcher }
    }

    /// Caption lines joined in order, each followed by a single space
    /// (trailing space included).
    pub async fn extract_transcript(&self, url: &str) -> AppResult<String> {
        let video_id = video_id_from_url(url);
        let lines = self.fetcher.fetch_transcript(video_id).await?;

        let mut text = String::new();
        for line in &lines {
            text.push_str(&line.text);
            text.push(' ');
        }
        Ok(text)
    }
}

static CAPTION_TRACKS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""captionTracks":(\[[^\]]*\])"#)
        .expect("CAPTION_TRACKS_RE is a valid regex pattern")
});

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimedTextTrack {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    #[serde(rename = "tStartMs", default)]
    start_ms: f64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: f64,
    #[serde(default)]
    segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Fetches the caption track advertised in the watch page's player
/// metadata and downloads it in json3 form.
pub struct HttpTranscriptFetcher {
    client: reqwest::Client,
    language: String,
}

impl HttpTranscriptFetcher {
    pub fn new(language: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            language: language.to_string(),
        }
    }

    /// Manually-authored track in the configured language, then any track
    /// in that language, then whatever the video offers.
    fn pick_track<'a>(&self, tracks: &'a [CaptionTrack]) -> Option<&'a CaptionTrack> {
        tracks
            .iter()
            .find(|t| t.language_code == self.language && t.kind.as_deref() != Some("asr"))
            .or_else(|| tracks.iter().find(|t| t.language_code == self.language))
            .or_else(|| tracks.first())
    }

    fn unavailable(video_id: &str, detail: impl std::fmt::Display) -> AppError {
        AppError::TranscriptUnavailable(format!("video '{video_id}': {detail}"))
    }
}

#[async_trait]
impl TranscriptFetcher for HttpTranscriptFetcher {
    async fn fetch_transcript(&self, video_id: &str) -> AppResult<Vec<CaptionLine>> {
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        let page = self
            .client
            .get(&watch_url)
            .send()
            .await
            .map_err(|e| Self::unavailable(video_id, format_args!("watch page fetch failed: {e}")))?
            .text()
            .await
            .map_err(|e| Self::unavailable(video_id, format_args!("watch page read failed: {e}")))?;

        let captures = CAPTION_TRACKS_RE
            .captures(&page)
            .ok_or_else(|| Self::unavailable(video_id, "no caption tracks"))?;
        let tracks: Vec<CaptionTrack> = serde_json::from_str(&captures[1])
            .map_err(|e| Self::unavailable(video_id, format_args!("caption track metadata did not parse: {e}")))?;

        let track = self
            .pick_track(&tracks)
            .ok_or_else(|| Self::unavailable(video_id, "no caption tracks"))?;
        log::debug!(
            "fetching '{}' caption track for video '{}'",
            track.language_code,
            video_id
        );

        let track_url = format!("{}&fmt=json3", track.base_url);
        let timed_text: TimedTextTrack = self
            .client
            .get(&track_url)
            .send()
            .await
            .map_err(|e| Self::unavailable(video_id, format_args!("caption track fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| Self::unavailable(video_id, format_args!("caption track did not parse: {e}")))?;

        let mut lines = Vec::new();
        for event in timed_text.events {
            let text: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            lines.push(CaptionLine {
                text: text.to_string(),
                start: event.start_ms / 1000.0,
                duration: event.duration_ms / 1000.0,
            });
        }

        if lines.is_empty() {
            return Err(Self::unavailable(video_id, "transcript is empty"));
        }
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> CaptionLine {
        CaptionLine {
            text: text.to_string(),
            start: 0.0,
            duration: 0.0,
        }
    }

    #[test]
    fn video_id_is_the_substring_after_the_last_equals() {
        assert_eq!(video_id_from_url("https://x/watch?v=ABC123"), "ABC123");
        assert_eq!(
            video_id_from_url("https://x/watch?list=PL1&v=XYZ789"),
            "XYZ789"
        );
    }

    #[test]
    fn url_without_equals_yields_the_whole_string() {
        assert_eq!(video_id_from_url("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
    }

    #[actix_web::test]
    async fn transcript_lines_are_space_joined_with_trailing_space() {
        let mut mock = MockTranscriptFetcher::new();
        mock.expect_fetch_transcript()
            .returning(|_| Ok(vec![line("Hello"), line("world")]));
        let extractor = TranscriptExtractor::new(Arc::new(mock));

        let text = extractor
            .extract_transcript("https://x/watch?v=ABC123")
            .await
            .expect("transcript should extract");

        assert_eq!(text, "Hello world ");
    }

    #[actix_web::test]
    async fn fetcher_receives_the_derived_video_id() {
        let mut mock = MockTranscriptFetcher::new();
        mock.expect_fetch_transcript()
            .withf(|video_id| video_id == "ABC123")
            .returning(|_| Ok(vec![line("hi")]));
        let extractor = TranscriptExtractor::new(Arc::new(mock));

        extractor
            .extract_transcript("https://x/watch?v=ABC123")
            .await
            .expect("transcript should extract");
    }

    #[actix_web::test]
    async fn unavailable_transcript_propagates() {
        let mut mock = MockTranscriptFetcher::new();
        mock.expect_fetch_transcript().returning(|video_id| {
            Err(AppError::TranscriptUnavailable(format!(
                "video '{video_id}': no caption tracks"
            )))
        });
        let extractor = TranscriptExtractor::new(Arc::new(mock));

        let result = extractor.extract_transcript("https://x/watch?v=gone").await;

        assert!(matches!(result, Err(AppError::TranscriptUnavailable(_))));
    }

    #[test]
    fn caption_tracks_pattern_finds_the_track_array() {
        let page = r#"...,"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc","languageCode":"en","kind":"asr"}],"audioTracks":[]}},..."#;

        let captures = CAPTION_TRACKS_RE.captures(page).expect("pattern matches");
        let tracks: Vec<CaptionTrack> =
            serde_json::from_str(&captures[1]).expect("track metadata parses");

        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].kind.as_deref(), Some("asr"));
    }

    #[test]
    fn track_selection_prefers_manual_captions_in_language() {
        let fetcher = HttpTranscriptFetcher::new("en");
        let tracks = vec![
            CaptionTrack {
                base_url: "https://t/asr".to_string(),
                language_code: "en".to_string(),
                kind: Some("asr".to_string()),
            },
            CaptionTrack {
                base_url: "https://t/manual".to_string(),
                language_code: "en".to_string(),
                kind: None,
            },
        ];

        let picked = fetcher.pick_track(&tracks).expect("a track is picked");
        assert_eq!(picked.base_url, "https://t/manual");
    }

    #[test]
    fn track_selection_falls_back_to_first_track() {
        let fetcher = HttpTranscriptFetcher::new("en");
        let tracks = vec![CaptionTrack {
            base_url: "https://t/de".to_string(),
            language_code: "de".to_string(),
            kind: None,
        }];

        let picked = fetcher.pick_track(&tracks).expect("a track is picked");
        assert_eq!(picked.language_code, "de");
    }
}
