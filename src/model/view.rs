/// Which slice of the list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// Parse a filter name as it appears on the CLI
    pub fn parse(s: &str) -> Option<Filter> {
        match s {
            "all" => Some(Filter::All),
            "active" => Some(Filter::Active),
            "completed" | "done" => Some(Filter::Completed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// The next filter in display order (for the TUI cycle key)
    pub fn next(self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }
}

/// Display-order override. `None` keeps storage order (newest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    None,
    /// Ascending by due date; tasks without one sort first
    DueDate,
    /// Incomplete before completed, stable within each group
    Status,
}

impl SortMode {
    pub fn parse(s: &str) -> Option<SortMode> {
        match s {
            "none" => Some(SortMode::None),
            "due-date" | "due" => Some(SortMode::DueDate),
            "status" => Some(SortMode::Status),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::DueDate => "due-date",
            SortMode::Status => "status",
        }
    }

    pub fn next(self) -> SortMode {
        match self {
            SortMode::None => SortMode::DueDate,
            SortMode::DueDate => SortMode::Status,
            SortMode::Status => SortMode::None,
        }
    }
}

/// Ephemeral view parameters. Reset to defaults on every launch and never
/// persisted; only the task list itself goes to disk.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filter: Filter,
    /// Lowercased search term; empty means "no search"
    pub search_term: String,
    pub sort_mode: SortMode,
}
