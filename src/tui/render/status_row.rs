use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the bottom status row. Its content depends on the mode: the
/// insert/search prompts live here, as do confirmations and one-shot
/// status messages.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let spans: Vec<Span> = match app.mode {
        Mode::Insert => prompt_spans(
            app,
            " add: ",
            &app.insert_input,
            app.insert_cursor,
            "Enter add  Esc cancel ",
            width,
        ),
        Mode::Search => {
            let cursor = app.search_input.len();
            prompt_spans(
                app,
                " /",
                &app.search_input,
                cursor,
                "Enter keep  Esc clear ",
                width,
            )
        }
        Mode::Edit => vec![Span::styled(
            " editing  Enter save  Esc cancel",
            Style::default().fg(theme.dim).bg(bg),
        )],
        Mode::ConfirmClear => {
            let counts = app.store.counts();
            let completed = counts.total - counts.remaining;
            vec![Span::styled(
                format!(" delete {} completed task(s)? y/n", completed),
                Style::default()
                    .fg(theme.yellow)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )]
        }
        Mode::Navigate => navigate_spans(app),
    };

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn navigate_spans(app: &App) -> Vec<Span<'static>> {
    let theme = &app.theme;
    let bg = theme.background;

    if let Some(message) = &app.status_message {
        return vec![Span::styled(
            format!(" {}", message),
            Style::default().fg(theme.text_bright).bg(bg),
        )];
    }
    let term = &app.store.view().search_term;
    if !term.is_empty() {
        return vec![Span::styled(
            format!(" /{}  Esc to clear", term),
            Style::default().fg(theme.dim).bg(bg),
        )];
    }
    if app.config.ui.show_key_hints {
        return vec![Span::styled(
            " n add  space toggle  e edit  d delete  f filter  s sort  / search  ? keys",
            Style::default().fg(theme.dim).bg(bg),
        )];
    }
    Vec::new()
}

/// A text prompt with a block cursor, plus a right-aligned key hint
fn prompt_spans(
    app: &App,
    label: &'static str,
    input: &str,
    cursor: usize,
    hint: &'static str,
    width: usize,
) -> Vec<Span<'static>> {
    let theme = &app.theme;
    let bg = theme.background;
    let cursor = cursor.min(input.len());

    let mut spans = vec![
        Span::styled(label, Style::default().fg(theme.cyan).bg(bg)),
        Span::styled(
            input[..cursor].to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ),
        Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(
            input[cursor..].to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ),
    ];

    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if used + hint_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(hint, Style::default().fg(theme.dim).bg(bg)));
    }
    spans
}
