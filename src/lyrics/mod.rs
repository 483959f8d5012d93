pub mod normalize;

use crate::api::{LookupTarget, LyricsLookup};
use crate::config::SuffixMode;
use crate::error::{InputError, LookupError};
pub use normalize::{normalize, title_case};
use serde::Serialize;

/// Suffixes tried after the plain lookup comes back empty
pub const RETRY_SUFFIXES: [&str; 4] = ["112602", "1234", "5678", "91011"];

pub const NOT_FOUND_MESSAGE: &str =
    "Lyrics not found on AZLyrics. Please check the artist or song name.";

/// Artist and song as typed by the user, already trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub artist: String,
    pub song: String,
}

impl Query {
    /// Validate raw form input. Both fields must be non-blank after trimming.
    pub fn from_input(artist: &str, song: &str) -> Result<Self, InputError> {
        let artist = artist.trim();
        let song = song.trim();

        if artist.is_empty() || song.is_empty() {
            return Err(InputError::MissingField);
        }

        Ok(Self {
            artist: artist.to_string(),
            song: song.to_string(),
        })
    }

    pub fn normalized(&self) -> NormalizedQuery {
        NormalizedQuery {
            artist: normalize(&self.artist),
            title: normalize(&self.song),
        }
    }

    /// Header line shown above the result
    pub fn heading(&self) -> String {
        format!(
            "Lyrics for {} by {}:",
            title_case(&self.song),
            title_case(&self.artist)
        )
    }

    /// Full text for the output area
    pub fn display(&self, result: &str) -> String {
        format!("{}\n\n{}", self.heading(), result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub artist: String,
    pub title: String,
}

impl NormalizedQuery {
    pub fn target(&self) -> LookupTarget {
        LookupTarget::new(self.artist.clone(), self.title.clone())
    }

    /// Speculative page URL for a retry suffix
    pub fn candidate_url(&self, base: &str, suffix: &str) -> String {
        format!("{}{}/{}{}.html", base, self.artist, self.title, suffix)
    }
}

/// Result printed by the one-shot `--json` mode
#[derive(Debug, Serialize)]
pub struct LyricsReport {
    pub artist: String,
    pub song: String,
    pub heading: String,
    pub lyrics: String,
}

impl LyricsReport {
    pub fn new(query: &Query, lyrics: String) -> Self {
        Self {
            artist: query.artist.clone(),
            song: query.song.clone(),
            heading: query.heading(),
            lyrics,
        }
    }
}

/// Look up lyrics, trying the plain page first and then each retry suffix.
///
/// Recoverable attempt errors are logged and skipped. A fatal error stops the
/// sequence and is returned. `Ok(None)` means every attempt came back empty.
pub async fn try_fetch_lyrics(
    lookup: &dyn LyricsLookup,
    query: &Query,
    mode: SuffixMode,
) -> Result<Option<String>, LookupError> {
    let normalized = query.normalized();
    let base_target = normalized.target();

    match attempt(lookup, &base_target).await {
        Ok(Some(lyrics)) => return Ok(Some(lyrics)),
        Ok(None) => {}
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => tracing::warn!("Base URL failed: {}", e),
    }

    for suffix in RETRY_SUFFIXES {
        let modified_url = normalized.candidate_url(lookup.lyrics_base(), suffix);
        tracing::debug!("Trying URL with suffix: {}", modified_url);

        // In repeat mode the candidate is only logged and the plain lookup runs again
        let target = match mode {
            SuffixMode::Repeat => base_target.clone(),
            SuffixMode::Candidate => base_target.clone().with_page_url(modified_url),
        };

        match attempt(lookup, &target).await {
            Ok(Some(lyrics)) => return Ok(Some(lyrics)),
            Ok(None) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => tracing::warn!("Failed with suffix {}: {}", suffix, e),
        }
    }

    Ok(None)
}

async fn attempt(
    lookup: &dyn LyricsLookup,
    target: &LookupTarget,
) -> Result<Option<String>, LookupError> {
    let lyrics = lookup.lookup(target).await?;
    Ok(lyrics.filter(|text| !text.trim().is_empty()))
}

/// Look up lyrics and always produce something displayable: the lyrics, the
/// not-found message, or an error description.
pub async fn fetch_lyrics(lookup: &dyn LyricsLookup, query: &Query, mode: SuffixMode) -> String {
    match try_fetch_lyrics(lookup, query, mode).await {
        Ok(Some(lyrics)) => lyrics,
        Ok(None) => {
            tracing::info!("No lyrics for: {} - {}", query.artist, query.song);
            NOT_FOUND_MESSAGE.to_string()
        }
        Err(e) => {
            tracing::error!("An unexpected error occurred: {}", e);
            format!("An error occurred: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AzLyricsClient, AZLYRICS_LYRICS_BASE};
    use crate::config::Config;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned responses and records every target it was asked for
    struct StubLookup {
        responses: Mutex<Vec<Result<Option<String>, LookupError>>>,
        fallback: fn() -> Result<Option<String>, LookupError>,
        calls: Mutex<Vec<LookupTarget>>,
    }

    impl StubLookup {
        fn always(fallback: fn() -> Result<Option<String>, LookupError>) -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                fallback,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn sequence(mut responses: Vec<Result<Option<String>, LookupError>>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                fallback: || Ok(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn targets(&self) -> Vec<LookupTarget> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LyricsLookup for StubLookup {
        async fn lookup(&self, target: &LookupTarget) -> Result<Option<String>, LookupError> {
            self.calls.lock().unwrap().push(target.clone());
            match self.responses.lock().unwrap().pop() {
                Some(response) => response,
                None => (self.fallback)(),
            }
        }
    }

    fn query() -> Query {
        Query::from_input("Artist", "Song").unwrap()
    }

    fn missing() -> Result<Option<String>, LookupError> {
        Err(LookupError::MissingLyrics {
            url: "https://www.azlyrics.com/lyrics/artist/song.html".into(),
        })
    }

    #[test]
    fn test_query_validation() {
        assert_eq!(Query::from_input("", "Song"), Err(InputError::MissingField));
        assert_eq!(Query::from_input("Artist", "   "), Err(InputError::MissingField));
        assert_eq!(Query::from_input("\t", "\n"), Err(InputError::MissingField));

        let q = Query::from_input("  Taylor Swift ", " shake it off").unwrap();
        assert_eq!(q.artist, "Taylor Swift");
        assert_eq!(q.song, "shake it off");
    }

    #[test]
    fn test_display_text() {
        let q = Query::from_input("taylor swift", "shake it off").unwrap();
        assert_eq!(
            q.display("La la la"),
            "Lyrics for Shake It Off by Taylor Swift:\n\nLa la la"
        );
    }

    #[test]
    fn test_candidate_url() {
        let normalized = Query::from_input("AC/DC", "T.N.T.").unwrap().normalized();
        assert_eq!(
            normalized.candidate_url(AZLYRICS_LYRICS_BASE, "1234"),
            "https://www.azlyrics.com/lyrics/acdc/tnt1234.html"
        );
    }

    #[tokio::test]
    async fn test_found_on_first_call() {
        let stub = StubLookup::sequence(vec![Ok(Some("La la la".into()))]);
        let result = fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert_eq!(result, "La la la");
        assert_eq!(stub.call_count(), 1);
        assert_eq!(stub.targets()[0], LookupTarget::new("artist", "song"));
    }

    #[tokio::test]
    async fn test_always_failing_lookup_is_not_found_after_five_calls() {
        let stub = StubLookup::always(missing);
        let result = fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert_eq!(result, NOT_FOUND_MESSAGE);
        assert_eq!(stub.call_count(), 5);
    }

    #[tokio::test]
    async fn test_empty_results_are_retried() {
        let stub = StubLookup::sequence(vec![
            Ok(None),
            Ok(Some("   \n".into())),
            missing(),
            Ok(Some("Found it".into())),
        ]);
        let result = fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert_eq!(result, "Found it");
        assert_eq!(stub.call_count(), 4);
    }

    #[tokio::test]
    async fn test_fatal_error_reports_error_message() {
        let stub = StubLookup::always(|| Err(LookupError::Timeout("operation timed out".into())));
        let result = fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert!(result.starts_with("An error occurred: "), "{result}");
        assert!(result.contains("operation timed out"));
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_client_build_failure_reports_error_message() {
        let config = Config {
            user_agent: "bad\nagent".into(),
            ..Config::default()
        };
        let client = AzLyricsClient::new(&config);
        let result = fetch_lyrics(&client, &query(), SuffixMode::Repeat).await;
        assert!(
            result.starts_with("An error occurred: failed to build HTTP client"),
            "{result}"
        );
    }

    #[tokio::test]
    async fn test_fatal_error_during_retries() {
        let stub = StubLookup::sequence(vec![
            missing(),
            Err(LookupError::Transport("connection reset".into())),
        ]);
        let result = try_fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert!(matches!(result, Err(LookupError::Transport(_))));
        assert_eq!(stub.call_count(), 2);
    }

    #[tokio::test]
    async fn test_repeat_mode_never_passes_candidates() {
        let stub = StubLookup::always(|| Ok(None));
        let result = try_fetch_lyrics(&stub, &query(), SuffixMode::Repeat).await;
        assert!(matches!(result, Ok(None)));

        let targets = stub.targets();
        assert_eq!(targets.len(), 5);
        assert!(targets.iter().all(|t| t.page_url.is_none()));
        assert!(targets.iter().all(|t| t == &targets[0]));
    }

    #[tokio::test]
    async fn test_candidate_mode_passes_suffixed_urls_in_order() {
        let stub = StubLookup::always(|| Ok(None));
        let _ = try_fetch_lyrics(&stub, &query(), SuffixMode::Candidate).await;

        let urls: Vec<Option<String>> = stub.targets().into_iter().map(|t| t.page_url).collect();
        assert_eq!(
            urls,
            vec![
                None,
                Some("https://www.azlyrics.com/lyrics/artist/song112602.html".into()),
                Some("https://www.azlyrics.com/lyrics/artist/song1234.html".into()),
                Some("https://www.azlyrics.com/lyrics/artist/song5678.html".into()),
                Some("https://www.azlyrics.com/lyrics/artist/song91011.html".into()),
            ]
        );
    }
}
