use crate::tui::state::Dialog;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Single-line labelled text field
pub struct TextInput<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(label: &'a str, value: &'a str, focused: bool) -> Self {
        Self {
            label,
            value,
            focused,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label);
        let inner = block.inner(area);

        // Keep the tail of long input visible
        let width = inner.width as usize;
        let len = self.value.chars().count();
        let visible: String = self
            .value
            .chars()
            .skip(len.saturating_sub(width.saturating_sub(1)))
            .collect();

        frame.render_widget(Paragraph::new(visible.as_str()).block(block), area);

        if self.focused && inner.width > 0 {
            let cursor_x = inner.x + (visible.chars().count() as u16).min(inner.width - 1);
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}

pub struct Button<'a> {
    label: &'a str,
    focused: bool,
    busy: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, focused: bool, busy: bool) -> Self {
        Self {
            label,
            focused,
            busy,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let style = match (self.busy, self.focused) {
            (true, _) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (false, false) => Style::default().fg(Color::Cyan),
        };

        // Center the label vertically
        let inner_height = area.height.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = vec![Line::raw(""); inner_height.saturating_sub(1) / 2];
        lines.push(Line::from(Span::styled(self.label, style)));

        let button = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(button, area);
    }
}

pub struct ErrorDialog;

impl ErrorDialog {
    pub fn render(frame: &mut Frame, dialog: &Dialog) {
        let area = centered_rect(frame.area(), 50, 7);

        let text = vec![
            Line::from(dialog.message.as_str()),
            Line::raw(""),
            Line::from(Span::styled(
                "Press Enter or Esc to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let widget = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(
                        dialog.title.as_str(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(widget, area);
    }
}

/// Rect of at most `width` x `height` centered inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}
