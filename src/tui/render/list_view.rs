use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::tui::app::App;
use crate::util::unicode;

/// Render the visible task list. One row per task; the selected row and
/// any flashed row get a background, and an in-flight inline edit shows
/// its buffer in place of the stored title.
pub fn render_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible_len = app.store.visible().len();
    if visible_len == 0 {
        let empty = Paragraph::new(Line::from(Span::styled(
            " nothing matches",
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        )));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor inside the viewport
    let height = area.height as usize;
    if height > 0 {
        if app.cursor < app.scroll_offset {
            app.scroll_offset = app.cursor;
        } else if app.cursor >= app.scroll_offset + height {
            app.scroll_offset = app.cursor + 1 - height;
        }
    }
    let scroll = app.scroll_offset.min(visible_len.saturating_sub(1));

    let today = Local::now().date_naive();
    let flashed = app.flashed_task_id().map(str::to_string);
    let width = area.width as usize;

    let mut lines = Vec::new();
    {
        let visible = app.store.visible();
        for (i, task) in visible.iter().copied().enumerate().skip(scroll).take(height) {
            let row_bg = if i == app.cursor {
                Some(app.theme.selection_bg)
            } else if flashed.as_deref() == Some(task.id.as_str()) {
                Some(app.theme.flash_bg)
            } else {
                None
            };
            lines.push(task_row(app, task, row_bg, today, width));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn task_row(
    app: &App,
    task: &Task,
    row_bg: Option<Color>,
    today: chrono::NaiveDate,
    width: usize,
) -> Line<'static> {
    let theme = &app.theme;
    let bg = row_bg.unwrap_or(theme.background);
    let with_bg = |style: Style| style.bg(bg);

    let mut spans = Vec::new();
    spans.push(Span::styled(" ", with_bg(Style::default())));

    // Checkbox
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    let checkbox_style = if task.completed {
        with_bg(Style::default().fg(theme.green))
    } else {
        with_bg(Style::default().fg(theme.dim))
    };
    spans.push(Span::styled(checkbox, checkbox_style));

    // Title — either the live edit buffer or the stored title
    if let Some(session) = &app.edit
        && session.task_id == task.id
    {
        let before = session.buffer[..session.cursor].to_string();
        let after = session.buffer[session.cursor..].to_string();
        let edit_style = with_bg(Style::default().fg(theme.text_bright));
        spans.push(Span::styled(before, edit_style));
        spans.push(Span::styled(
            "\u{258C}",
            with_bg(Style::default().fg(theme.highlight)),
        ));
        spans.push(Span::styled(after, edit_style));
    } else {
        let title_style = if task.completed {
            with_bg(
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            with_bg(Style::default().fg(theme.text))
        };
        let match_style = with_bg(
            Style::default()
                .fg(theme.search_match_fg)
                .bg(theme.search_match_bg),
        );
        title_spans(&task.title, app, title_style, match_style, &mut spans);
    }

    // Category and due date
    if let Some(category) = &task.category {
        spans.push(Span::styled(
            format!("  @{}", category),
            with_bg(Style::default().fg(theme.cyan)),
        ));
    }
    if let Some(due) = &task.due_date {
        let overdue = task.due().is_some_and(|d| d < today) && !task.completed;
        let due_style = if overdue {
            with_bg(Style::default().fg(theme.red))
        } else {
            with_bg(Style::default().fg(theme.dim))
        };
        spans.push(Span::styled(format!("  due {}", due), due_style));
    }

    // Right-aligned creation date, when there is room
    let created = format!("{} ", task.created_at.with_timezone(&Local).format("%Y-%m-%d"));
    let used: usize = spans
        .iter()
        .map(|s| unicode::display_width(s.content.as_ref()))
        .sum();
    let created_width = created.chars().count();
    if used + created_width < width {
        spans.push(Span::styled(
            " ".repeat(width - used - created_width),
            with_bg(Style::default()),
        ));
        spans.push(Span::styled(
            created,
            with_bg(Style::default().fg(theme.dim)),
        ));
    }

    Line::from(spans)
}

/// Split a title into spans, highlighting search matches
fn title_spans(
    title: &str,
    app: &App,
    base: Style,
    highlight: Style,
    spans: &mut Vec<Span<'static>>,
) {
    let Some(re) = app.search_regex() else {
        spans.push(Span::styled(title.to_string(), base));
        return;
    };
    let mut last = 0;
    for m in re.find_iter(title) {
        if m.start() > last {
            spans.push(Span::styled(title[last..m.start()].to_string(), base));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight));
        last = m.end();
    }
    if last < title.len() {
        spans.push(Span::styled(title[last..].to_string(), base));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render_list_to_string(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_list(frame, app, area);
        })
    }

    #[test]
    fn rows_show_checkbox_and_title() {
        let mut app = app_with_tasks(vec![
            make_task("Buy milk", false),
            make_task("Walk dog", true),
        ]);
        let output = render_list_to_string(&mut app);
        assert!(output.contains("[ ] Buy milk"));
        assert!(output.contains("[x] Walk dog"));
    }

    #[test]
    fn rows_show_category_and_due() {
        let mut task = make_task("File taxes", false);
        task.category = Some("finance".into());
        task.due_date = Some("2026-04-15".into());
        let mut app = app_with_tasks(vec![task]);
        let output = render_list_to_string(&mut app);
        assert!(output.contains("@finance"));
        assert!(output.contains("due 2026-04-15"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut app = app_with_tasks(vec![]);
        let output = render_list_to_string(&mut app);
        assert!(output.contains("nothing matches"));
    }

    #[test]
    fn editing_row_shows_buffer_and_cursor() {
        let mut app = app_with_tasks(vec![make_task("Old title", false)]);
        app.start_edit();
        app.edit.as_mut().unwrap().buffer = "New title".into();
        app.edit.as_mut().unwrap().cursor = 3;
        let output = render_list_to_string(&mut app);
        assert!(output.contains("New\u{258C} title"));
        assert!(!output.contains("Old title"));
    }

    #[test]
    fn viewport_scrolls_to_cursor() {
        let tasks: Vec<_> = (0..40)
            .map(|i| make_task(&format!("task number {:02}", i), false))
            .collect();
        let mut app = app_with_tasks(tasks);
        app.cursor = 39;
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_list(frame, &mut app, area);
        });
        assert!(output.contains("task number 39"));
        assert!(!output.contains("task number 00"));
    }
}
