//! Day-planner tools — an in-memory agenda of events and tasks.
//!
//! Events carry a summary, optional description/location, and a start/end
//! time; tasks carry a title, optional notes and due date, and a
//! `needsAction`/`completed` status. The store is process-local and shared
//! between the tools via `Arc`; nothing is persisted.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};

use super::base::{optional_i64, optional_string, require_string, Tool};

/// Default number of events returned by `list_events`.
const DEFAULT_EVENT_LIMIT: usize = 3;

/// Hour of day used when an event is given a bare date (or no date at all).
const DEFAULT_EVENT_HOUR: u32 = 15;

// ─────────────────────────────────────────────
// Agenda data
// ─────────────────────────────────────────────

/// A calendar entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Completion state of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    NeedsAction,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NeedsAction => "needsAction",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A to-do entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    pub title: String,
    pub notes: Option<String>,
    pub due: Option<NaiveDate>,
    pub status: TaskStatus,
}

// ─────────────────────────────────────────────
// AgendaStore
// ─────────────────────────────────────────────

#[derive(Debug, Default)]
struct AgendaInner {
    events: Vec<Event>,
    tasks: Vec<Task>,
}

/// Shared in-memory agenda.
///
/// Thread-safe via `RwLock` — multiple readers, exclusive writer.
#[derive(Debug, Default)]
pub struct AgendaStore {
    inner: RwLock<AgendaInner>,
}

impl AgendaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event.
    pub fn add_event(&self, event: Event) {
        let mut inner = self.inner.write().unwrap();
        inner.events.push(event);
    }

    /// Events starting at or after `now`, ordered by start time, at most
    /// `limit` of them.
    pub fn upcoming_events(&self, now: NaiveDateTime, limit: usize) -> Vec<Event> {
        let inner = self.inner.read().unwrap();
        let mut upcoming: Vec<Event> = inner
            .events
            .iter()
            .filter(|e| e.start >= now)
            .cloned()
            .collect();
        upcoming.sort_by_key(|e| e.start);
        upcoming.truncate(limit);
        upcoming
    }

    /// Add a task.
    pub fn add_task(&self, task: Task) {
        let mut inner = self.inner.write().unwrap();
        inner.tasks.push(task);
    }

    /// All tasks, in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.read().unwrap().tasks.clone()
    }

    /// Mark the first open task with the given title (case-insensitive) as
    /// completed. Returns `false` if no such task exists.
    pub fn complete_task(&self, title: &str) -> bool {
        let key = title.to_lowercase();
        let mut inner = self.inner.write().unwrap();
        match inner
            .tasks
            .iter_mut()
            .find(|t| t.status == TaskStatus::NeedsAction && t.title.to_lowercase() == key)
        {
            Some(task) => {
                task.status = TaskStatus::Completed;
                true
            }
            None => false,
        }
    }
}

// ─────────────────────────────────────────────
// Date parsing
// ─────────────────────────────────────────────

/// Parse a model-supplied timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DD HH:MM`,
/// or a bare `YYYY-MM-DD` (taken at the default event hour).
fn parse_when(s: &str) -> anyhow::Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::from_hms_opt(DEFAULT_EVENT_HOUR, 0, 0).unwrap()));
    }
    anyhow::bail!("Unrecognized date/time: '{s}' (use YYYY-MM-DD or YYYY-MM-DDTHH:MM)")
}

/// Parse a model-supplied due date (`YYYY-MM-DD`).
fn parse_due(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Unrecognized due date: '{s}' (use YYYY-MM-DD)"))
}

/// Default event start: tomorrow at the default hour.
fn default_start(now: NaiveDateTime) -> NaiveDateTime {
    (now.date() + Duration::days(1))
        .and_time(NaiveTime::from_hms_opt(DEFAULT_EVENT_HOUR, 0, 0).unwrap())
}

// ─────────────────────────────────────────────
// Event tools
// ─────────────────────────────────────────────

/// Creates a calendar event.
pub struct AddEventTool {
    store: Arc<AgendaStore>,
}

impl AddEventTool {
    pub fn new(store: Arc<AgendaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for AddEventTool {
    fn name(&self) -> &str {
        "add_event"
    }

    fn description(&self) -> &str {
        "Adds an event to the user's calendar.\n\
         Args:\n\
         - summary (string, required): short title of the event\n\
         - start (string, optional): start time as YYYY-MM-DDTHH:MM; defaults to tomorrow 15:00\n\
         - end (string, optional): end time; defaults to one hour after start\n\
         - description (string, optional): longer details\n\
         - location (string, optional): where the event takes place"
    }

    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String> {
        let summary = require_string(&args, "summary")?;
        let start = match optional_string(&args, "start") {
            Some(s) => parse_when(&s)?,
            None => default_start(Local::now().naive_local()),
        };
        let end = match optional_string(&args, "end") {
            Some(s) => parse_when(&s)?,
            None => start + Duration::hours(1),
        };
        if end < start {
            anyhow::bail!("Event ends before it starts");
        }

        let event = Event {
            summary: summary.clone(),
            description: optional_string(&args, "description"),
            location: optional_string(&args, "location"),
            start,
            end,
        };
        self.store.add_event(event);
        Ok(format!(
            "Event created: {} at {}",
            summary,
            start.format("%Y-%m-%d %H:%M")
        ))
    }
}

/// Lists upcoming calendar events.
pub struct ListEventsTool {
    store: Arc<AgendaStore>,
}

impl ListEventsTool {
    pub fn new(store: Arc<AgendaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListEventsTool {
    fn name(&self) -> &str {
        "list_events"
    }

    fn description(&self) -> &str {
        "Lists the user's upcoming calendar events, soonest first.\n\
         Args:\n\
         - limit (integer, optional): how many events to return, default 3"
    }

    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String> {
        let limit = optional_i64(&args, "limit")
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(DEFAULT_EVENT_LIMIT);
        let events = self
            .store
            .upcoming_events(Local::now().naive_local(), limit);

        if events.is_empty() {
            return Ok("No upcoming events.".to_string());
        }

        let lines: Vec<String> = events
            .iter()
            .map(|e| {
                let mut line =
                    format!("{} - {}", e.start.format("%Y-%m-%d %H:%M"), e.summary);
                if let Some(loc) = &e.location {
                    line.push_str(&format!(" ({loc})"));
                }
                line
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

// ─────────────────────────────────────────────
// Task tools
// ─────────────────────────────────────────────

/// Creates a to-do task.
pub struct AddTaskTool {
    store: Arc<AgendaStore>,
}

impl AddTaskTool {
    pub fn new(store: Arc<AgendaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for AddTaskTool {
    fn name(&self) -> &str {
        "add_task"
    }

    fn description(&self) -> &str {
        "Adds a task to the user's to-do list.\n\
         Args:\n\
         - title (string, required): what needs to be done\n\
         - notes (string, optional): extra details\n\
         - due (string, optional): due date as YYYY-MM-DD"
    }

    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String> {
        let title = require_string(&args, "title")?;
        let due = match optional_string(&args, "due") {
            Some(s) => Some(parse_due(&s)?),
            None => None,
        };

        self.store.add_task(Task {
            title: title.clone(),
            notes: optional_string(&args, "notes"),
            due,
            status: TaskStatus::NeedsAction,
        });
        Ok(format!("Task added: {title}"))
    }
}

/// Lists all tasks.
pub struct ListTasksTool {
    store: Arc<AgendaStore>,
}

impl ListTasksTool {
    pub fn new(store: Arc<AgendaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListTasksTool {
    fn name(&self) -> &str {
        "list_tasks"
    }

    fn description(&self) -> &str {
        "Lists the user's tasks with their status and due dates.\n\
         Args: none"
    }

    async fn execute(&self, _args: Map<String, Value>) -> anyhow::Result<String> {
        let tasks = self.store.tasks();
        if tasks.is_empty() {
            return Ok("No tasks.".to_string());
        }

        let lines: Vec<String> = tasks
            .iter()
            .map(|t| {
                let marker = match t.status {
                    TaskStatus::NeedsAction => "[ ]",
                    TaskStatus::Completed => "[x]",
                };
                let mut line = format!("{marker} {}", t.title);
                if let Some(due) = t.due {
                    line.push_str(&format!(" (due {due})"));
                }
                if let Some(notes) = &t.notes {
                    line.push_str(&format!(" — {notes}"));
                }
                line
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

/// Marks a task as completed.
pub struct CompleteTaskTool {
    store: Arc<AgendaStore>,
}

impl CompleteTaskTool {
    pub fn new(store: Arc<AgendaStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CompleteTaskTool {
    fn name(&self) -> &str {
        "complete_task"
    }

    fn description(&self) -> &str {
        "Marks an open task as completed.\n\
         Args:\n\
         - title (string, required): title of the task to complete"
    }

    async fn execute(&self, args: Map<String, Value>) -> anyhow::Result<String> {
        let title = require_string(&args, "title")?;
        if self.store.complete_task(&title) {
            Ok(format!("Task completed: {title}"))
        } else {
            anyhow::bail!("No open task titled '{title}'")
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args_from(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    // ── Store ──

    #[test]
    fn test_upcoming_events_sorted_and_limited() {
        let store = AgendaStore::new();
        for (summary, start) in [
            ("later", "2026-08-10T10:00:00"),
            ("past", "2026-08-01T10:00:00"),
            ("soon", "2026-08-05T09:00:00"),
            ("soonish", "2026-08-06T09:00:00"),
        ] {
            store.add_event(Event {
                summary: summary.to_string(),
                description: None,
                location: None,
                start: dt(start),
                end: dt(start) + Duration::hours(1),
            });
        }

        let now = dt("2026-08-04T12:00:00");
        let upcoming = store.upcoming_events(now, 2);
        let names: Vec<&str> = upcoming.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(names, vec!["soon", "soonish"]);
    }

    #[test]
    fn test_task_status_strings() {
        assert_eq!(TaskStatus::NeedsAction.as_str(), "needsAction");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_complete_task_case_insensitive() {
        let store = AgendaStore::new();
        store.add_task(Task {
            title: "Buy Milk".to_string(),
            notes: None,
            due: None,
            status: TaskStatus::NeedsAction,
        });

        assert!(store.complete_task("buy milk"));
        assert_eq!(store.tasks()[0].status, TaskStatus::Completed);
        // Already completed — nothing left to complete
        assert!(!store.complete_task("buy milk"));
    }

    // ── Parsing ──

    #[test]
    fn test_parse_when_formats() {
        assert_eq!(parse_when("2026-08-05T09:30:00").unwrap(), dt("2026-08-05T09:30:00"));
        assert_eq!(parse_when("2026-08-05T09:30").unwrap(), dt("2026-08-05T09:30:00"));
        assert_eq!(parse_when("2026-08-05 09:30").unwrap(), dt("2026-08-05T09:30:00"));
        // Bare date lands on the default hour
        assert_eq!(parse_when("2026-08-05").unwrap(), dt("2026-08-05T15:00:00"));
        assert!(parse_when("next tuesday").is_err());
    }

    #[test]
    fn test_default_start_is_tomorrow_afternoon() {
        let now = dt("2026-08-04T22:30:00");
        assert_eq!(default_start(now), dt("2026-08-05T15:00:00"));
    }

    // ── Tools ──

    #[tokio::test]
    async fn test_add_event_with_defaults() {
        let store = Arc::new(AgendaStore::new());
        let tool = AddEventTool::new(store.clone());

        let out = tool
            .execute(args_from(json!({"summary": "dentist", "start": "2099-01-02T10:00"})))
            .await
            .unwrap();
        assert!(out.contains("dentist"));

        let events = store.upcoming_events(dt("2098-12-31T00:00:00"), 10);
        assert_eq!(events.len(), 1);
        // Default duration is one hour
        assert_eq!(events[0].end - events[0].start, Duration::hours(1));
    }

    #[tokio::test]
    async fn test_add_event_rejects_backwards_times() {
        let tool = AddEventTool::new(Arc::new(AgendaStore::new()));
        let err = tool
            .execute(args_from(json!({
                "summary": "x",
                "start": "2099-01-02T10:00",
                "end": "2099-01-02T09:00"
            })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ends before"));
    }

    #[tokio::test]
    async fn test_list_events_empty() {
        let tool = ListEventsTool::new(Arc::new(AgendaStore::new()));
        let out = tool.execute(Map::new()).await.unwrap();
        assert_eq!(out, "No upcoming events.");
    }

    #[tokio::test]
    async fn test_list_events_formats_lines() {
        let store = Arc::new(AgendaStore::new());
        store.add_event(Event {
            summary: "standup".to_string(),
            description: None,
            location: Some("room 2".to_string()),
            start: dt("2099-01-02T09:00:00"),
            end: dt("2099-01-02T09:15:00"),
        });

        let tool = ListEventsTool::new(store);
        let out = tool.execute(Map::new()).await.unwrap();
        assert!(out.contains("2099-01-02 09:00 - standup (room 2)"));
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let store = Arc::new(AgendaStore::new());
        let add = AddTaskTool::new(store.clone());
        let list = ListTasksTool::new(store.clone());
        let complete = CompleteTaskTool::new(store.clone());

        add.execute(args_from(json!({"title": "buy milk", "due": "2026-08-10"})))
            .await
            .unwrap();

        let out = list.execute(Map::new()).await.unwrap();
        assert!(out.contains("[ ] buy milk (due 2026-08-10)"));

        complete
            .execute(args_from(json!({"title": "buy milk"})))
            .await
            .unwrap();
        let out = list.execute(Map::new()).await.unwrap();
        assert!(out.contains("[x] buy milk"));
    }

    #[tokio::test]
    async fn test_complete_unknown_task_errors() {
        let tool = CompleteTaskTool::new(Arc::new(AgendaStore::new()));
        let err = tool
            .execute(args_from(json!({"title": "ghost"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn test_add_task_rejects_bad_due() {
        let tool = AddTaskTool::new(Arc::new(AgendaStore::new()));
        let err = tool
            .execute(args_from(json!({"title": "x", "due": "someday"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("someday"));
    }
}
