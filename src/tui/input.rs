use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Bare modifier presses carry no intent
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Help overlay swallows everything and closes
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Insert => handle_insert(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::ConfirmClear => handle_confirm_clear(app, key),
    }
}

// ---------------------------------------------------------------------------
// Navigate
// ---------------------------------------------------------------------------

fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.store.visible().len();
            if len > 0 && app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.store.visible().len().saturating_sub(1);
        }

        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_at_cursor(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_at_cursor(app),
        KeyCode::Char('e') | KeyCode::Enter => app.start_edit(),

        // The "focus the new-task input" shortcut; only reachable here,
        // i.e. when no text field has focus
        KeyCode::Char('n') | KeyCode::Char('a') => {
            app.insert_input.clear();
            app.insert_cursor = 0;
            app.mode = Mode::Insert;
        }

        KeyCode::Char('/') => {
            app.search_input = app.store.view().search_term.clone();
            app.mode = Mode::Search;
        }

        KeyCode::Char('f') => {
            let next = app.store.view().filter.next();
            app.store.set_filter(next);
            app.cursor = 0;
            app.scroll_offset = 0;
        }
        KeyCode::Char('s') => {
            let next = app.store.view().sort_mode.next();
            app.store.set_sort_mode(next);
            app.cursor = 0;
            app.scroll_offset = 0;
        }

        KeyCode::Char('c') => start_clear_completed(app),
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Esc => {
            // Dismiss search term and any lingering status message
            app.store.set_search_term("");
            app.status_message = None;
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn toggle_at_cursor(app: &mut App) {
    let Some(id) = app.cursor_task_id() else {
        return;
    };
    let result = app.store.toggle_completed(&id);
    app.report_save(result.map(|_| ()));
    app.start_flash(id);
    app.clamp_cursor();
}

fn delete_at_cursor(app: &mut App) {
    let Some(id) = app.cursor_task_id() else {
        return;
    };
    let title = app.store.get(&id).map(|t| t.title.clone()).unwrap_or_default();
    // Removal is synchronous; only the status message lingers
    let result = app.store.remove(&id);
    app.report_save(result.map(|_| ()));
    app.status_message = Some(format!(
        "deleted \u{201C}{}\u{201D}",
        unicode::truncate_to_width(&title, 40)
    ));
    app.clamp_cursor();
}

fn start_clear_completed(app: &mut App) {
    let counts = app.store.counts();
    if counts.total == counts.remaining {
        app.status_message = Some("nothing completed to clear".into());
        return;
    }
    if app.config.ui.confirm_clear {
        app.mode = Mode::ConfirmClear;
    } else {
        do_clear_completed(app);
    }
}

fn do_clear_completed(app: &mut App) {
    match app.store.clear_completed() {
        Ok(cleared) => app.status_message = Some(format!("cleared {} completed", cleared)),
        Err(e) => app.status_message = Some(format!("save failed: {}", e)),
    }
    app.clamp_cursor();
}

// ---------------------------------------------------------------------------
// Search (live: every keystroke refilters)
// ---------------------------------------------------------------------------

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.mode = Mode::Navigate,
        KeyCode::Esc => {
            app.search_input.clear();
            app.store.set_search_term("");
            app.mode = Mode::Navigate;
            app.clamp_cursor();
        }
        KeyCode::Backspace => {
            if let Some(boundary) =
                unicode::prev_grapheme_boundary(&app.search_input, app.search_input.len())
            {
                app.search_input.truncate(boundary);
                apply_live_search(app);
            }
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            apply_live_search(app);
        }
        _ => {}
    }
}

fn apply_live_search(app: &mut App) {
    let term = app.search_input.clone();
    app.store.set_search_term(&term);
    app.cursor = 0;
    app.scroll_offset = 0;
}

// ---------------------------------------------------------------------------
// Insert (new-task prompt)
// ---------------------------------------------------------------------------

fn handle_insert(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let title = app.insert_input.clone();
            match app.store.add(&title, None, None) {
                // Blank titles fall through silently, same as submitting
                // an empty form
                Ok(Some(id)) => {
                    app.cursor = 0;
                    app.scroll_offset = 0;
                    app.start_flash(id);
                }
                Ok(None) => {}
                Err(e) => app.status_message = Some(format!("save failed: {}", e)),
            }
            app.insert_input.clear();
            app.insert_cursor = 0;
            app.mode = Mode::Navigate;
        }
        KeyCode::Esc => {
            app.insert_input.clear();
            app.insert_cursor = 0;
            app.mode = Mode::Navigate;
        }
        _ => {
            let mut buffer = std::mem::take(&mut app.insert_input);
            let mut cursor = app.insert_cursor;
            line_edit(&mut buffer, &mut cursor, key);
            app.insert_input = buffer;
            app.insert_cursor = cursor;
        }
    }
}

// ---------------------------------------------------------------------------
// Edit (inline title edit)
// ---------------------------------------------------------------------------

fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        _ => {
            if let Some(session) = app.edit.as_mut() {
                let mut cursor = session.cursor;
                line_edit(&mut session.buffer, &mut cursor, key);
                session.cursor = cursor;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Confirm clear
// ---------------------------------------------------------------------------

fn handle_confirm_clear(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.mode = Mode::Navigate;
            do_clear_completed(app);
        }
        _ => app.mode = Mode::Navigate,
    }
}

// ---------------------------------------------------------------------------
// Shared single-line editing
// ---------------------------------------------------------------------------

/// Apply one key to a single-line buffer. `cursor` is a byte offset and
/// stays on a grapheme boundary.
fn line_edit(buffer: &mut String, cursor: &mut usize, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => {
            buffer.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(boundary) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(boundary..*cursor, "");
                *cursor = boundary;
            }
        }
        KeyCode::Delete => {
            if let Some(boundary) = unicode::next_grapheme_boundary(buffer, *cursor) {
                buffer.replace_range(*cursor..boundary, "");
            }
        }
        KeyCode::Left => {
            if let Some(boundary) = unicode::prev_grapheme_boundary(buffer, *cursor) {
                *cursor = boundary;
            }
        }
        KeyCode::Right => {
            if let Some(boundary) = unicode::next_grapheme_boundary(buffer, *cursor) {
                *cursor = boundary;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buffer.len(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::view::Filter;
    use crate::tui::render::test_helpers::{app_with_tasks, make_task};
    use crossterm::event::KeyEvent;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn toggle_key_flips_task_under_cursor() {
        let mut app = app_with_tasks(vec![make_task("A", false), make_task("B", false)]);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.store.visible()[0].completed);
        // Flash points at the toggled task
        let flashed = app.flashed_task_id().map(str::to_string);
        assert_eq!(flashed.as_deref(), Some(app.store.visible()[0].id.as_str()));
    }

    #[test]
    fn delete_key_removes_synchronously() {
        let mut app = app_with_tasks(vec![make_task("A", false), make_task("B", false)]);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.counts().total, 1);
        assert!(app.status_message.as_deref().unwrap().contains("deleted"));
    }

    #[test]
    fn insert_mode_adds_on_enter() {
        let mut app = app_with_tasks(vec![make_task("Old", false)]);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.mode, Mode::Insert);
        type_str(&mut app, "New task");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.visible()[0].title, "New task");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn insert_mode_blank_title_adds_nothing() {
        let mut app = app_with_tasks(vec![]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.store.counts().total, 0);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn edit_commits_trimmed_title() {
        let mut app = app_with_tasks(vec![make_task("Old", false)]);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        // Wipe the buffer, type a padded replacement
        for _ in 0.."Old".len() {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "  New  ");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.visible()[0].title, "New");
        assert!(app.edit.is_none());
    }

    #[test]
    fn edit_escape_reverts() {
        let mut app = app_with_tasks(vec![make_task("Old", false)]);
        press(&mut app, KeyCode::Char('e'));
        type_str(&mut app, "typed junk");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.store.visible()[0].title, "Old");
        assert!(app.edit.is_none());
    }

    #[test]
    fn search_is_live_and_escape_clears() {
        let mut app = app_with_tasks(vec![
            make_task("Buy Milk", false),
            make_task("Walk dog", false),
        ]);
        press(&mut app, KeyCode::Char('/'));
        type_str(&mut app, "milk");
        // Filtered before Enter is pressed
        assert_eq!(app.store.visible().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.store.visible().len(), 2);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn filter_key_cycles() {
        let mut app = app_with_tasks(vec![make_task("A", true), make_task("B", false)]);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.store.view().filter, Filter::Active);
        assert_eq!(app.store.visible().len(), 1);
    }

    #[test]
    fn clear_asks_for_confirmation_then_clears() {
        let mut app = app_with_tasks(vec![make_task("A", true), make_task("B", false)]);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, Mode::ConfirmClear);

        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.counts().total, 1);
    }

    #[test]
    fn clear_confirmation_declined_keeps_tasks() {
        let mut app = app_with_tasks(vec![make_task("A", true)]);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.counts().total, 1);
    }

    #[test]
    fn clear_with_nothing_completed_short_circuits() {
        let mut app = app_with_tasks(vec![make_task("A", false)]);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.status_message.as_deref().unwrap().contains("nothing"));
    }

    #[test]
    fn line_edit_handles_graphemes() {
        let mut buffer = String::from("cafe\u{0301}");
        let mut cursor = buffer.len();
        line_edit(&mut buffer, &mut cursor, KeyEvent::from(KeyCode::Backspace));
        // The whole é (e + combining accent) goes at once
        assert_eq!(buffer, "caf");
        assert_eq!(cursor, 3);

        line_edit(&mut buffer, &mut cursor, KeyEvent::from(KeyCode::Char('s')));
        assert_eq!(buffer, "cafs");
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut app = app_with_tasks(vec![make_task("A", false)]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('d'));
        assert!(!app.show_help);
        // The 'd' closed the overlay instead of deleting
        assert_eq!(app.store.counts().total, 1);
    }
}
