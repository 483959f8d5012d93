use clap::{Parser, ValueEnum};

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// How the suffix retry uses the candidate URLs it computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SuffixMode {
    /// Log each candidate URL but repeat the plain lookup
    #[default]
    Repeat,
    /// Fetch each candidate URL
    Candidate,
}

#[derive(Debug, Parser)]
#[command(
    name = "geturlyrics",
    version,
    about = "Look up song lyrics on AZLyrics",
    after_help = "Without --artist/--song an interactive form is opened.\n\nEXAMPLES:\n    geturlyrics\n    geturlyrics --artist \"Taylor Swift\" --song \"Shake It Off\""
)]
pub struct Cli {
    /// Artist name (one-shot mode, requires --song)
    #[arg(long, requires = "song")]
    pub artist: Option<String>,

    /// Song title (one-shot mode, requires --artist)
    #[arg(long, requires = "artist")]
    pub song: Option<String>,

    /// Print the one-shot result as JSON
    #[arg(long, requires = "artist")]
    pub json: bool,

    /// What the retry loop does with its suffixed candidate URLs
    #[arg(long, value_enum, default_value_t = SuffixMode::Repeat)]
    pub suffix_mode: SuffixMode,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent to the lyrics site
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Ignore HTTP(S)_PROXY settings from the environment
    #[arg(long)]
    pub no_proxy: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub suffix_mode: SuffixMode,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub no_proxy: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            suffix_mode: cli.suffix_mode,
            timeout_secs: cli.timeout.max(1),
            user_agent: cli
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
            no_proxy: cli.no_proxy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix_mode: SuffixMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            no_proxy: false,
        }
    }
}

fn default_user_agent() -> String {
    format!("geturlyrics/{}", env!("CARGO_PKG_VERSION"))
}
