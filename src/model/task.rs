use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do entry. Field names in the persisted JSON are camelCase
/// and timestamps are epoch milliseconds, matching the original storage
/// records this tool reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique ID, assigned at creation, never changed
    pub id: String,
    /// Display text; never persisted empty
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Last-mutation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Optional free-text category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Optional due date, stored as loose text (`YYYY-MM-DD` when written
    /// by this tool). Parsed on demand via [`Task::due`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Create a new incomplete task with a fresh ID, timestamped now.
    pub fn new(title: String, category: Option<String>, due_date: Option<String>) -> Self {
        let now = Utc::now();
        Task {
            id: new_task_id(),
            title,
            completed: false,
            created_at: now,
            updated_at: now,
            category,
            due_date,
        }
    }

    /// The parsed due date. Anything missing or unparsable is `None`;
    /// a hand-edited value degrades to "no due date" rather than an error.
    pub fn due(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// Generate an opaque unique ID: creation time in base-36 plus a random
/// base-36 suffix. Uniqueness within one list is all that matters.
pub fn new_task_id() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    format!(
        "{}{}",
        to_base36(millis),
        to_base36(rand::random::<u32>() as u64)
    )
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults() {
        let task = Task::new("Buy milk".into(), None, None);
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
        assert!(!task.id.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let a = new_task_id();
        let b = new_task_id();
        assert_ne!(a, b);
    }

    #[test]
    fn due_parses_iso_date() {
        let mut task = Task::new("t".into(), None, Some("2026-09-01".into()));
        assert_eq!(task.due(), NaiveDate::from_ymd_opt(2026, 9, 1));

        task.due_date = Some("  2026-09-01  ".into());
        assert_eq!(task.due(), NaiveDate::from_ymd_opt(2026, 9, 1));
    }

    #[test]
    fn due_swallows_garbage() {
        let mut task = Task::new("t".into(), None, Some("next tuesday".into()));
        assert_eq!(task.due(), None);

        task.due_date = None;
        assert_eq!(task.due(), None);
    }

    #[test]
    fn serde_uses_camel_case_and_millis() {
        let json = r#"{
            "id": "abc123",
            "title": "Buy milk",
            "completed": true,
            "createdAt": 1756300000000,
            "updatedAt": 1756300001000,
            "dueDate": "2026-09-01"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "abc123");
        assert!(task.completed);
        assert_eq!(task.created_at.timestamp_millis(), 1756300000000);
        assert_eq!(task.due_date.as_deref(), Some("2026-09-01"));
        assert_eq!(task.category, None);

        let out = serde_json::to_string(&task).unwrap();
        assert!(out.contains("\"createdAt\":1756300000000"));
        assert!(out.contains("\"dueDate\""));
        // Absent optionals are not written
        assert!(!out.contains("category"));
    }

    #[test]
    fn serde_defaults_on_minimal_record() {
        let json = r#"{"id":"x","title":"t","createdAt":0,"updatedAt":0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed);
        assert_eq!(task.category, None);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }
}
