use crate::tui::{
    state::{AppState, Focus, Status},
    widgets::{Button, ErrorDialog, TextInput},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::rc::Rc;

/// Render the TUI (Elm Architecture - View)
pub fn render(frame: &mut Frame, state: &AppState) {
    // Clear the frame to prevent ghost characters
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Reset)),
        frame.area(),
    );

    let chunks = screen_layout(frame.area());

    render_header(frame, chunks[0], state);
    render_form(frame, chunks[1], state);
    render_output(frame, chunks[2], state);
    render_footer(frame, chunks[3], state);

    if let Some(dialog) = &state.dialog {
        ErrorDialog::render(frame, dialog);
    }
}

fn screen_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Form
            Constraint::Min(5),    // Lyrics (responsive)
            Constraint::Length(3), // Footer
        ])
        .split(area)
}

fn output_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Lyrics")
}

/// Text area of the lyrics pane for a screen of the given size
pub fn output_viewport(area: Rect) -> Rect {
    output_block().inner(screen_layout(area)[2])
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let (title, color) = match &state.status {
        Status::Idle => ("GetUrLyrics".to_string(), Color::Cyan),
        Status::Fetching(what) => (format!("GetUrLyrics - Fetching {}...", what), Color::Yellow),
        Status::Complete => ("GetUrLyrics - Done ✓".to_string(), Color::Green),
        Status::Cancelled => ("GetUrLyrics - Cancelled".to_string(), Color::Magenta),
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

fn render_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(area);

    let fields = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(columns[0]);

    // The dialog owns the cursor while it is open
    let form_active = state.dialog.is_none();

    TextInput::new(
        "Artist Name",
        &state.artist,
        form_active && state.focus == Focus::Artist,
    )
    .render(frame, fields[0]);
    TextInput::new(
        "Song Name",
        &state.song,
        form_active && state.focus == Focus::Song,
    )
    .render(frame, fields[1]);
    Button::new(
        "Get Lyrics",
        state.focus == Focus::Button,
        state.is_fetching(),
    )
    .render(frame, columns[1]);
}

fn render_output(frame: &mut Frame, area: Rect, state: &AppState) {
    let output = Paragraph::new(state.output.as_str())
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0))
        .block(output_block())
        .style(Style::default().fg(Color::White));

    frame.render_widget(output, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };

    let mut spans = vec![
        key("Tab", Color::Yellow),
        Span::raw(" Next field | "),
        key("Enter", Color::Green),
        Span::raw(" Get lyrics | "),
        key("PgUp/PgDn", Color::Cyan),
        Span::raw(" Scroll | "),
    ];

    if state.is_fetching() {
        spans.push(key("Esc", Color::Magenta));
        spans.push(Span::raw(" Cancel"));
    } else {
        spans.push(key("Esc", Color::Red));
        spans.push(Span::raw(" Quit"));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}
