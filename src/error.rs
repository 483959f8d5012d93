use thiserror::Error;

/// Errors raised by a single lyrics lookup attempt
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("no lyrics block found on {url}")]
    MissingLyrics { url: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl LookupError {
    /// Fatal errors abort the retry sequence instead of moving on to the next attempt
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LookupError::Timeout(_) | LookupError::Transport(_) | LookupError::Client(_)
        )
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::Timeout(err.to_string())
        } else if err.is_builder() {
            LookupError::Client(err.to_string())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}

/// Form validation failures, shown to the user as a dialog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter both artist and song name.")]
    MissingField,
}

impl InputError {
    /// Dialog title used by the form
    pub fn title(&self) -> &'static str {
        match self {
            InputError::MissingField => "Input Error",
        }
    }
}
