/// What a single lookup attempt asks the lyrics site for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTarget {
    pub artist: String,
    pub title: String,
    /// Explicit page to fetch instead of the one derived from artist and title
    pub page_url: Option<String>,
}

impl LookupTarget {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            page_url: None,
        }
    }

    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }
}
