use crate::error::InputError;
use crate::lyrics::Query;
use crate::messages::WorkerMessage;
use ratatui::widgets::{Paragraph, Wrap};

const SCROLL_STEP: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Artist,
    Song,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Artist => Focus::Song,
            Focus::Song => Focus::Button,
            Focus::Button => Focus::Artist,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Artist => Focus::Button,
            Focus::Song => Focus::Artist,
            Focus::Button => Focus::Song,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Fetching(String),
    Complete,
    Cancelled,
}

/// Modal message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl From<InputError> for Dialog {
    fn from(err: InputError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub artist: String,
    pub song: String,
    pub focus: Focus,
    pub output: String,
    pub status: Status,
    pub dialog: Option<Dialog>,
    pub should_quit: bool,
    pub scroll_offset: u16,
    /// Generation of the most recently submitted fetch
    pub fetch_id: u64,
    /// Inner size of the lyrics pane, as last laid out
    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            artist: String::new(),
            song: String::new(),
            focus: Focus::Artist,
            output: String::new(),
            status: Status::Idle,
            dialog: None,
            should_quit: false,
            scroll_offset: 0,
            fetch_id: 0,
            viewport_width: 0,
            viewport_height: 0,
        }
    }

    /// Update state based on worker messages (Elm Architecture - Update)
    pub fn update(&mut self, msg: WorkerMessage) {
        match msg {
            WorkerMessage::LyricsReady {
                fetch_id,
                query,
                text,
            } => {
                // A cancelled fetch may still deliver its result
                if !self.is_fetching() || fetch_id != self.fetch_id {
                    tracing::debug!(
                        "Dropping stale result #{} for: {} - {}",
                        fetch_id,
                        query.artist,
                        query.song
                    );
                    return;
                }
                self.output = query.display(&text);
                self.scroll_offset = 0;
                self.status = Status::Complete;
            }
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.status, Status::Fetching(_))
    }

    /// Validate the form and move into the fetching state.
    ///
    /// Returns the query to fetch, or `None` when a fetch is already running
    /// or the input was rejected (in which case an error dialog is opened).
    pub fn submit(&mut self) -> Option<Query> {
        if self.is_fetching() {
            return None;
        }

        match Query::from_input(&self.artist, &self.song) {
            Ok(query) => {
                self.fetch_id = self.fetch_id.wrapping_add(1);
                self.status = Status::Fetching(format!("{} - {}", query.artist, query.song));
                Some(query)
            }
            Err(e) => {
                tracing::debug!("Rejected form input: {}", e);
                self.dialog = Some(e.into());
                None
            }
        }
    }

    pub fn cancel_fetch(&mut self) {
        if self.is_fetching() {
            self.status = Status::Cancelled;
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Artist => Some(&mut self.artist),
            Focus::Song => Some(&mut self.song),
            Focus::Button => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field_mut() {
            field.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Rows the output occupies once wrapped to the viewport width
    fn output_rows(&self) -> usize {
        if self.viewport_width == 0 {
            return self.output.lines().count();
        }
        Paragraph::new(self.output.as_str())
            .wrap(Wrap { trim: false })
            .line_count(self.viewport_width)
    }

    fn max_scroll(&self) -> u16 {
        let max = self
            .output_rows()
            .saturating_sub(self.viewport_height.max(1) as usize);
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(SCROLL_STEP)
            .min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(SCROLL_STEP);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
