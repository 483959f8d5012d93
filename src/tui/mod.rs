pub mod state;
pub mod ui;
pub mod widgets;

use crate::api::LyricsLookup;
use crate::config::SuffixMode;
use crate::lyrics::{self, Query};
use crate::messages::WorkerMessage;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use state::{AppState, Focus};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub struct App {
    state: AppState,
    lookup: Arc<dyn LyricsLookup>,
    suffix_mode: SuffixMode,
    worker_tx: mpsc::UnboundedSender<WorkerMessage>,
    worker_rx: mpsc::UnboundedReceiver<WorkerMessage>,
    fetch_handle: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(lookup: Arc<dyn LyricsLookup>, suffix_mode: SuffixMode) -> Self {
        let (worker_tx, worker_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            lookup,
            suffix_mode,
            worker_tx,
            worker_rx,
            fetch_handle: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        self.cancel_fetch();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            // Scroll limits depend on how the lyrics pane wraps at this size
            let size = terminal.size()?;
            let viewport = ui::output_viewport(Rect::new(0, 0, size.width, size.height));
            self.state.set_viewport(viewport.width, viewport.height);

            // Render UI
            terminal.draw(|f| ui::render(f, &self.state))?;

            // Handle events (non-blocking)
            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.drain_messages();

            if self.state.should_quit {
                break;
            }

            // 60fps target
            tokio::time::sleep(std::time::Duration::from_millis(16)).await;
        }

        Ok(())
    }

    /// Apply every message the fetch task has sent so far
    pub fn drain_messages(&mut self) {
        while let Ok(msg) = self.worker_rx.try_recv() {
            self.state.update(msg);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return;
        }

        if self.state.dialog.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                self.state.dismiss_dialog();
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.state.is_fetching() {
                    self.cancel_fetch();
                } else {
                    self.state.should_quit = true;
                }
            }
            KeyCode::Tab | KeyCode::Down => self.state.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.state.focus_prev(),
            KeyCode::Enter => self.submit(),
            KeyCode::Char(' ') if self.state.focus == Focus::Button => self.submit(),
            KeyCode::Char(c) => self.state.insert_char(c),
            KeyCode::Backspace => self.state.backspace(),
            KeyCode::PageDown => self.state.scroll_down(),
            KeyCode::PageUp => self.state.scroll_up(),
            _ => {}
        }
    }

    fn submit(&mut self) {
        if let Some(query) = self.state.submit() {
            self.spawn_fetch(query);
        }
    }

    fn spawn_fetch(&mut self, query: Query) {
        tracing::info!("Fetching lyrics for: {} - {}", query.artist, query.song);

        let lookup = self.lookup.clone();
        let tx = self.worker_tx.clone();
        let mode = self.suffix_mode;
        let fetch_id = self.state.fetch_id;

        self.fetch_handle = Some(tokio::spawn(async move {
            let text = lyrics::fetch_lyrics(lookup.as_ref(), &query, mode).await;
            let _ = tx.send(WorkerMessage::LyricsReady {
                fetch_id,
                query,
                text,
            });
        }));
    }

    fn cancel_fetch(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            if !handle.is_finished() {
                tracing::info!("Cancelling in-flight fetch");
                handle.abort();
            }
        }
        self.state.cancel_fetch();
    }

    /// Wait for the current fetch task, if any, to finish
    pub async fn wait_for_fetch(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            let _ = handle.await;
        }
    }
}
