use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

const BINDINGS: &[(&str, &str)] = &[
    ("n / a", "add a task"),
    ("space / x", "toggle done"),
    ("e / Enter", "edit title"),
    ("d / Del", "delete task"),
    ("f", "cycle filter"),
    ("s", "cycle sort"),
    ("/", "search"),
    ("c", "clear completed"),
    ("j / k", "move cursor"),
    ("g / G", "jump to top / bottom"),
    ("?", "toggle this help"),
    ("q", "quit"),
];

/// Render the key-binding overlay, centered over the whole screen
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let overlay_w = 40u16.min(area.width);
    let overlay_h = (BINDINGS.len() as u16 + 2).min(area.height);
    let overlay = Rect {
        x: area.x + (area.width.saturating_sub(overlay_w)) / 2,
        y: area.y + (area.height.saturating_sub(overlay_h)) / 2,
        width: overlay_w,
        height: overlay_h,
    };

    frame.render_widget(Clear, overlay);

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<11}", key),
                    Style::default().fg(theme.highlight).bg(theme.background),
                ),
                Span::styled(
                    action.to_string(),
                    Style::default().fg(theme.text).bg(theme.background),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" keys ")
        .style(Style::default().bg(theme.background))
        .border_style(Style::default().fg(theme.dim));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, overlay);
}
