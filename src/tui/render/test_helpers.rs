use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::store_io::StoreFile;
use crate::model::config::AppConfig;
use crate::model::task::Task;
use crate::store::TodoStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render one frame into a test backend and return the buffer as plain
/// text, with trailing blank lines trimmed.
pub fn render_to_string<F>(width: u16, height: u16, mut draw: F) -> String
where
    F: FnMut(&mut Frame, Rect),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            draw(frame, area);
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut lines = Vec::new();
    for y in 0..height {
        let mut line = String::new();
        for x in 0..width {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

static TASK_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A task with a deterministic id and timestamp; each call gets a
/// distinct id and a slightly later creation time.
pub fn make_task(title: &str, completed: bool) -> Task {
    let n = TASK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let at = Utc.timestamp_millis_opt(1_756_300_000_000 + n as i64).unwrap();
    Task {
        id: format!("task{}", n),
        title: title.to_string(),
        completed,
        created_at: at,
        updated_at: at,
        category: None,
        due_date: None,
    }
}

/// A store whose file points at a scratch path. Tests that mutate it
/// write real files there; nothing reads them back.
pub fn test_store(tasks: Vec<Task>) -> TodoStore {
    let dir = std::env::temp_dir().join("tick-tui-tests");
    TodoStore::with_tasks(tasks, StoreFile::new(&dir))
}

pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    App::new(test_store(tasks), AppConfig::default())
}
