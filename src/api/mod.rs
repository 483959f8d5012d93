pub mod types;

use crate::config::Config;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::StatusCode;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;
pub use types::LookupTarget;

pub const AZLYRICS_LYRICS_BASE: &str = "https://www.azlyrics.com/lyrics/";

/// Something that can retrieve lyric text for an artist/title pair.
///
/// `Ok(None)` means the source answered but had no lyrics.
#[async_trait]
pub trait LyricsLookup: Send + Sync {
    /// Prefix that lyric page URLs are built from
    fn lyrics_base(&self) -> &str {
        AZLYRICS_LYRICS_BASE
    }

    async fn lookup(&self, target: &LookupTarget) -> Result<Option<String>, LookupError>;
}

/// AZLyrics page scraper.
///
/// The HTTP client is built on first use so that a build failure surfaces
/// from `lookup` like any other fatal error.
pub struct AzLyricsClient {
    user_agent: String,
    timeout: Duration,
    no_proxy: bool,
    client: OnceLock<reqwest::Client>,
}

impl AzLyricsClient {
    pub fn new(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            no_proxy: config.no_proxy,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&reqwest::Client, LookupError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout);
        if self.no_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| LookupError::Client(e.to_string()))?;

        Ok(self.client.get_or_init(|| client))
    }

    /// Page URL for a target, honouring an explicit override
    pub fn page_url(&self, target: &LookupTarget) -> String {
        match &target.page_url {
            Some(url) => url.clone(),
            None => format!(
                "{}{}/{}.html",
                self.lyrics_base(),
                target.artist,
                target.title
            ),
        }
    }
}

#[async_trait]
impl LyricsLookup for AzLyricsClient {
    async fn lookup(&self, target: &LookupTarget) -> Result<Option<String>, LookupError> {
        let url = self.page_url(target);

        tracing::debug!("Fetching lyrics page: {}", url);

        let response = self.client()?.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!("No page for: {} - {}", target.artist, target.title);
                Ok(None)
            }
            status if status.is_success() => {
                let html = response.text().await?;
                match extract_lyrics(&html) {
                    Some(lyrics) if lyrics.is_empty() => Ok(None),
                    Some(lyrics) => Ok(Some(lyrics)),
                    None => Err(LookupError::MissingLyrics { url }),
                }
            }
            status => Err(LookupError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

/// Pull the lyric text out of an AZLyrics song page.
///
/// The lyrics sit in the first class-less `div` of the main column. Returns
/// `None` when the page has no such block.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let lyrics_sel = Selector::parse("div.col-xs-12.col-lg-8.text-center > div:not([class])")
        .expect("valid selector");

    let block = document.select(&lyrics_sel).next()?;
    let text: String = block.text().collect();

    Some(
        text.lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SONG_PAGE: &str = r#"<html><body>
<div class="container main-page">
<div class="row">
<div class="col-xs-12 col-lg-8 text-center">
<div class="ringtone"><span id="cf_text_top"></span></div>
<div class="lyricsh"><h2><b>Artist Lyrics</b></h2></div>
<b>"Song"</b><br>
<div>
<!-- Usage of azlyrics.com content by any third-party lyrics provider is prohibited by our licensing agreement. Sorry about that. -->
First line<br>
Second line <i>[Chorus]</i><br>
<br>
Third line<br>
</div>
<div class="noprint" style="margin-bottom:20px;"></div>
</div>
</div>
</div>
</body></html>"#;

    fn test_config() -> Config {
        Config {
            timeout_secs: 1,
            no_proxy: true,
            ..Config::default()
        }
    }

    /// Serve one canned HTTP response on a local port and return its URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{}/lyrics/artist/song.html", addr)
    }

    fn target_at(url: &str) -> LookupTarget {
        LookupTarget::new("artist", "song").with_page_url(url)
    }

    #[tokio::test]
    async fn test_lookup_found() {
        let url = serve_once("200 OK", SONG_PAGE).await;
        let client = AzLyricsClient::new(&test_config());
        let lyrics = client.lookup(&target_at(&url)).await.unwrap();
        assert_eq!(
            lyrics.as_deref(),
            Some("First line\nSecond line [Chorus]\n\nThird line")
        );
    }

    #[tokio::test]
    async fn test_lookup_not_found() {
        let url = serve_once("404 Not Found", "<html>gone</html>").await;
        let client = AzLyricsClient::new(&test_config());
        assert!(client.lookup(&target_at(&url)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_server_error() {
        let url = serve_once("500 Internal Server Error", "oops").await;
        let client = AzLyricsClient::new(&test_config());
        let err = client.lookup(&target_at(&url)).await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 500, .. }), "{err:?}");
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_lookup_page_without_lyrics() {
        let url = serve_once("200 OK", "<html><body><p>Search results</p></body></html>").await;
        let client = AzLyricsClient::new(&test_config());
        let err = client.lookup(&target_at(&url)).await.unwrap_err();
        assert!(matches!(err, LookupError::MissingLyrics { .. }), "{err:?}");
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_lookup_timeout_is_fatal() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without ever answering
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let client = AzLyricsClient::new(&test_config());
        let url = format!("http://{}/lyrics/artist/song.html", addr);
        let err = client.lookup(&target_at(&url)).await.unwrap_err();
        assert!(matches!(err, LookupError::Timeout(_)), "{err:?}");
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_client_build_failure_surfaces_from_lookup() {
        let config = Config {
            user_agent: "bad\nagent".into(),
            ..test_config()
        };
        let client = AzLyricsClient::new(&config);
        let err = client
            .lookup(&LookupTarget::new("artist", "song"))
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Client(_)), "{err:?}");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_extract_lyrics() {
        let lyrics = extract_lyrics(SONG_PAGE).unwrap();
        assert_eq!(lyrics, "First line\nSecond line [Chorus]\n\nThird line");
    }

    #[test]
    fn test_extract_lyrics_missing_block() {
        let html = r#"<html><body><div class="col-xs-12 col-lg-8 text-center">
<div class="ringtone"></div></div></body></html>"#;
        assert!(extract_lyrics(html).is_none());
    }

    #[test]
    fn test_page_url_from_target() {
        let client = AzLyricsClient::new(&test_config());
        let target = LookupTarget::new("taylorswift", "shakeitoff");
        assert_eq!(
            client.page_url(&target),
            "https://www.azlyrics.com/lyrics/taylorswift/shakeitoff.html"
        );
    }

    #[test]
    fn test_page_url_override() {
        let client = AzLyricsClient::new(&test_config());
        let target = LookupTarget::new("acdc", "tnt")
            .with_page_url("https://www.azlyrics.com/lyrics/acdc/tnt1234.html");
        assert_eq!(
            client.page_url(&target),
            "https://www.azlyrics.com/lyrics/acdc/tnt1234.html"
        );
    }
}
