use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::cli::output::format_counts_line;
use crate::model::view::{Filter, SortMode};
use crate::tui::app::App;

/// Render the two header rows: title, filter tabs, view indicators, and
/// the counts on the right; then a separator line.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        " tick ",
        Style::default()
            .fg(theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    // Filter tabs
    let current = app.store.view().filter;
    for filter in [Filter::All, Filter::Active, Filter::Completed] {
        spans.push(Span::styled("  ", Style::default().bg(bg)));
        let style = if filter == current {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(bg)
        };
        spans.push(Span::styled(filter.label(), style));
    }

    // Sort and search indicators
    let sort_mode = app.store.view().sort_mode;
    if sort_mode != SortMode::None {
        spans.push(Span::styled(
            format!("  sort:{}", sort_mode.label()),
            Style::default().fg(theme.yellow).bg(bg),
        ));
    }
    let term = &app.store.view().search_term;
    if !term.is_empty() {
        spans.push(Span::styled(
            format!("  /{}", term),
            Style::default().fg(theme.cyan).bg(bg),
        ));
    }

    // Right-aligned counts
    let counts = format!("{} ", format_counts_line(app.store.counts()));
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let counts_width = counts.chars().count();
    if used + counts_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - counts_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(counts, Style::default().fg(theme.dim).bg(bg)));
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans), separator]);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_shows_tabs_and_counts() {
        let app = app_with_tasks(vec![make_task("A", true), make_task("B", false)]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("tick"));
        assert!(output.contains("all"));
        assert!(output.contains("active"));
        assert!(output.contains("completed"));
        assert!(output.contains("2 tasks \u{2014} 1 remaining"));
        // No sort indicator by default
        assert!(!output.contains("sort:"));
    }

    #[test]
    fn header_shows_sort_and_search_indicators() {
        let mut app = app_with_tasks(vec![make_task("A", false)]);
        app.store.set_sort_mode(crate::model::view::SortMode::DueDate);
        app.store.set_search_term("milk");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_header(frame, &app, area);
        });
        assert!(output.contains("sort:due-date"));
        assert!(output.contains("/milk"));
    }
}
