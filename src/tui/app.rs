use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::config_io;
use crate::io::paths;
use crate::io::store_io::{StoreError, StoreFile};
use crate::model::config::AppConfig;
use crate::store::TodoStore;

use super::input;
use super::render;
use super::theme::Theme;

/// How long the add/toggle row highlight stays on screen
pub const FLASH_MS: u64 = 450;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Live search; every keystroke refilters the list
    Search,
    /// New-task prompt in the status row
    Insert,
    /// Inline title edit in the list row
    Edit,
    /// y/n prompt before clearing completed tasks
    ConfirmClear,
}

/// Short-lived state for one inline title edit. Created when the edit
/// starts, destroyed on commit or cancel; while it lives, the list row
/// shows the buffer instead of the stored title.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub task_id: String,
    pub buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    pub cursor: usize,
}

/// Transient row highlight after add/toggle. Purely presentational —
/// expiry only stops the highlight, it never touches task data.
#[derive(Debug, Clone)]
pub struct Flash {
    pub task_id: String,
    pub started: Instant,
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// First visible row of the list viewport
    pub scroll_offset: usize,
    /// Search buffer while in Search mode
    pub search_input: String,
    /// New-task buffer while in Insert mode
    pub insert_input: String,
    /// Byte offset into `insert_input`
    pub insert_cursor: usize,
    pub edit: Option<EditSession>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub flash: Option<Flash>,
}

impl App {
    pub fn new(store: TodoStore, config: AppConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            store,
            config,
            theme,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            search_input: String::new(),
            insert_input: String::new(),
            insert_cursor: 0,
            edit: None,
            show_help: false,
            status_message: None,
            flash: None,
        }
    }

    /// The ID of the task under the cursor, if any
    pub fn cursor_task_id(&self) -> Option<String> {
        self.store
            .visible()
            .get(self.cursor)
            .map(|t| t.id.clone())
    }

    /// Keep the cursor inside the visible list after a mutation or a
    /// view-parameter change shrank it
    pub fn clamp_cursor(&mut self) {
        let len = self.store.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Begin inline editing of the task under the cursor. Re-invoking
    /// while that task is already being edited is a no-op.
    pub fn start_edit(&mut self) {
        let Some(id) = self.cursor_task_id() else {
            return;
        };
        if let Some(session) = &self.edit
            && session.task_id == id
        {
            return;
        }
        let Some(task) = self.store.get(&id) else {
            return;
        };
        let buffer = task.title.clone();
        let cursor = buffer.len();
        self.edit = Some(EditSession {
            task_id: id,
            buffer,
            cursor,
        });
        self.mode = Mode::Edit;
    }

    /// Commit the edit if the buffer trims non-empty, else revert.
    /// Either way the session is destroyed.
    pub fn commit_edit(&mut self) {
        let Some(session) = self.edit.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        if !session.buffer.trim().is_empty() {
            let result = self.store.edit_title(&session.task_id, &session.buffer);
            self.report_save(result.map(|_| ()));
        }
        self.mode = Mode::Navigate;
    }

    /// Abandon the edit, restoring the prior title
    pub fn cancel_edit(&mut self) {
        self.edit = None;
        self.mode = Mode::Navigate;
    }

    pub fn start_flash(&mut self, task_id: String) {
        self.flash = Some(Flash {
            task_id,
            started: Instant::now(),
        });
    }

    /// Drop the flash once its time is up (called from the event loop tick)
    pub fn expire_flash(&mut self) {
        if let Some(flash) = &self.flash
            && flash.started.elapsed() >= Duration::from_millis(FLASH_MS)
        {
            self.flash = None;
        }
    }

    pub fn flashed_task_id(&self) -> Option<&str> {
        self.flash.as_ref().map(|f| f.task_id.as_str())
    }

    /// Regex for highlighting search matches in titles. Case-insensitive
    /// with the term escaped, so it matches exactly what the store's
    /// substring search matched.
    pub fn search_regex(&self) -> Option<Regex> {
        let term = match self.mode {
            Mode::Search => self.search_input.trim(),
            _ => self.store.view().search_term.as_str(),
        };
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }

    /// Surface a failed persistence write in the status row; in-memory
    /// state is already updated and stays that way
    pub fn report_save(&mut self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            self.status_message = Some(format!("save failed: {}", e));
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point and event loop
// ---------------------------------------------------------------------------

pub fn run(data_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let dir = paths::data_dir(data_dir.map(Path::new))?;
    let config = config_io::load_config(&dir);
    let store = TodoStore::open(StoreFile::new(&dir));
    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.expire_flash();
        terminal.draw(|frame| render::render(frame, app))?;

        // Short poll so flash expiry repaints promptly
        if event::poll(Duration::from_millis(150))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
