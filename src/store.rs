use chrono::Utc;

use crate::io::store_io::{StoreError, StoreFile};
use crate::model::task::Task;
use crate::model::view::{Filter, SortMode, ViewState};

/// Unfiltered list totals for the counts footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub total: usize,
    /// Tasks not yet completed
    pub remaining: usize,
}

/// The authoritative task list plus the ephemeral view parameters.
///
/// Storage order is insertion order, newest first; sort modes only affect
/// the projection returned by [`visible`](TodoStore::visible). Every
/// mutation that changes the list writes the full snapshot back through
/// the [`StoreFile`] before returning.
///
/// Lookups by unknown ID are deliberate no-ops throughout — for a
/// single-user local list that is the contract, not an error.
pub struct TodoStore {
    tasks: Vec<Task>,
    view: ViewState,
    file: StoreFile,
}

impl TodoStore {
    /// Load whatever `file` holds (empty on missing or corrupt data) and
    /// start with default view parameters.
    pub fn open(file: StoreFile) -> Self {
        let tasks = file.load();
        Self::with_tasks(tasks, file)
    }

    /// Build a store over `file` with an explicit starting list.
    pub fn with_tasks(tasks: Vec<Task>, file: StoreFile) -> Self {
        TodoStore {
            tasks,
            view: ViewState::default(),
            file,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // -----------------------------------------------------------------
    // Mutations — each persists before returning
    // -----------------------------------------------------------------

    /// Add a task to the front of the list. A title that trims to empty
    /// is ignored (nothing persisted). Returns the new task's ID.
    pub fn add(
        &mut self,
        title: &str,
        category: Option<String>,
        due_date: Option<String>,
    ) -> Result<Option<String>, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let task = Task::new(title.to_string(), category, due_date);
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.file.save(&self.tasks)?;
        Ok(Some(id))
    }

    /// Flip a task's completed flag. Unknown IDs are ignored (and nothing
    /// is written). Returns whether a task changed.
    pub fn toggle_completed(&mut self, id: &str) -> Result<bool, StoreError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        task.updated_at = Utc::now();
        self.file.save(&self.tasks)?;
        Ok(true)
    }

    /// Remove the task with the given ID. The snapshot is rewritten even
    /// when nothing matched. Returns whether a task was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        self.file.save(&self.tasks)?;
        Ok(removed)
    }

    /// Overwrite a task's title. An edit whose result trims to empty is
    /// abandoned — the prior title stands and nothing is written.
    pub fn edit_title(&mut self, id: &str, new_title: &str) -> Result<bool, StoreError> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Ok(false);
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        task.title = new_title.to_string();
        task.updated_at = Utc::now();
        self.file.save(&self.tasks)?;
        Ok(true)
    }

    /// Drop every completed task. Persists unconditionally. Returns how
    /// many tasks were dropped.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        self.file.save(&self.tasks)?;
        Ok(before - self.tasks.len())
    }

    // -----------------------------------------------------------------
    // View parameters — never touch storage
    // -----------------------------------------------------------------

    pub fn set_filter(&mut self, filter: Filter) {
        self.view.filter = filter;
    }

    /// Set the search term, trimmed and lowercased for matching
    pub fn set_search_term(&mut self, term: &str) {
        self.view.search_term = term.trim().to_lowercase();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.view.sort_mode = mode;
    }

    // -----------------------------------------------------------------
    // Derived state
    // -----------------------------------------------------------------

    /// The filtered, searched, and sorted projection shown to the user.
    /// Returns a fresh sequence every call; storage order is untouched.
    pub fn visible(&self) -> Vec<&Task> {
        let term = self.view.search_term.as_str();
        let mut out: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| match self.view.filter {
                Filter::All => true,
                Filter::Active => !t.completed,
                Filter::Completed => t.completed,
            })
            .filter(|t| term.is_empty() || t.title.to_lowercase().contains(term))
            .collect();

        match self.view.sort_mode {
            SortMode::None => {}
            // Missing or unparsable due dates sort as 1970-01-01
            SortMode::DueDate => out.sort_by_key(|t| t.due().unwrap_or_default()),
            SortMode::Status => out.sort_by_key(|t| t.completed),
        }
        out
    }

    pub fn counts(&self) -> Counts {
        Counts {
            total: self.tasks.len(),
            remaining: self.tasks.iter().filter(|t| !t.completed).count(),
        }
    }
}
