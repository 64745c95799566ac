use serde::Serialize;

use crate::model::task::Task;
use crate::store::Counts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CountsJson {
    pub total: usize,
    pub remaining: usize,
}

#[derive(Serialize)]
pub struct ListJson<'a> {
    pub tasks: Vec<&'a Task>,
    pub counts: CountsJson,
}

#[derive(Serialize)]
pub struct AddedJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
}

pub fn counts_to_json(counts: Counts) -> CountsJson {
    CountsJson {
        total: counts.total,
        remaining: counts.remaining,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One aligned text row: checkbox, id, title, then category/due if set
pub fn format_task_line(task: &Task, id_width: usize) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{} {:<id_width$}  {}", checkbox, task.id, task.title);
    if let Some(category) = &task.category {
        line.push_str(&format!("  @{}", category));
    }
    if let Some(due) = &task.due_date {
        line.push_str(&format!("  due {}", due));
    }
    line
}

pub fn format_counts_line(counts: Counts) -> String {
    let noun = if counts.total == 1 { "task" } else { "tasks" };
    format!(
        "{} {} \u{2014} {} remaining",
        counts.total, noun, counts.remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_task(title: &str, completed: bool) -> Task {
        let mut task = Task::new(title.into(), None, None);
        task.id = "abc123".into();
        task.completed = completed;
        task
    }

    #[test]
    fn task_line_open_task() {
        let line = format_task_line(&fixed_task("Buy milk", false), 6);
        assert_eq!(line, "[ ] abc123  Buy milk");
    }

    #[test]
    fn task_line_with_category_and_due() {
        let mut task = fixed_task("File taxes", true);
        task.category = Some("finance".into());
        task.due_date = Some("2026-04-15".into());
        let line = format_task_line(&task, 6);
        assert_eq!(line, "[x] abc123  File taxes  @finance  due 2026-04-15");
    }

    #[test]
    fn counts_line_pluralizes() {
        let one = format_counts_line(Counts {
            total: 1,
            remaining: 1,
        });
        assert_eq!(one, "1 task \u{2014} 1 remaining");

        let many = format_counts_line(Counts {
            total: 3,
            remaining: 0,
        });
        assert_eq!(many, "3 tasks \u{2014} 0 remaining");
    }
}
