use anyhow::{Context, Result};
use clap::Parser;
use geturlyrics::api::AzLyricsClient;
use geturlyrics::config::{Cli, Config};
use geturlyrics::lyrics::{self, LyricsReport, Query};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    // File-based logging keeps the terminal clean for the form and for stdout output
    let log_dir = geturlyrics::paths::get_log_dir()?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "geturlyrics.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geturlyrics=debug,reqwest=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    tracing::info!(
        "Starting geturlyrics (suffix mode: {:?}, timeout: {}s)",
        config.suffix_mode,
        config.timeout_secs
    );

    let client = AzLyricsClient::new(&config);

    match (cli.artist.as_deref(), cli.song.as_deref()) {
        (Some(artist), Some(song)) => run_once(&client, &config, artist, song, cli.json).await,
        _ => run_form(Arc::new(client), &config).await,
    }
}

async fn run_once(
    client: &AzLyricsClient,
    config: &Config,
    artist: &str,
    song: &str,
    json: bool,
) -> Result<()> {
    let query = Query::from_input(artist, song)?;
    let text = lyrics::fetch_lyrics(client, &query, config.suffix_mode).await;

    if json {
        let report = LyricsReport::new(&query, text);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        println!("{}", query.display(&text));
    }

    Ok(())
}

async fn run_form(client: Arc<AzLyricsClient>, config: &Config) -> Result<()> {
    let mut app = geturlyrics::tui::App::new(client, config.suffix_mode);
    app.run().await?;

    tracing::info!("Form closed");
    Ok(())
}
