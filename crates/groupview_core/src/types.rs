use std::fmt;

pub type GroupId = String;
pub type TaskId = String;

/// Opaque pagination continuation token.
pub type Cursor = String;

/// Sentinel cursor naming the first page of a group, before any
/// continuation has been issued.
pub const INITIAL_CURSOR: &str = "initial";

/// Page size for the initial query of a freshly selected group.
pub const INITIAL_PAGE_SIZE: u32 = 20;

/// Page size for self-driving continuation fetches.
pub const CONTINUATION_PAGE_SIZE: u32 = 1000;

/// Lifecycle state of a single task, as reported by page fetches and
/// push-stream events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Unscheduled,
    Pending,
    Running,
    Completed,
    Failed,
    Exception,
}

impl TaskState {
    /// Canonical lowercase name used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Unscheduled => "unscheduled",
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
            TaskState::Exception => "exception",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unscheduled" => Some(TaskState::Unscheduled),
            "pending" => Some(TaskState::Pending),
            "running" => Some(TaskState::Running),
            "completed" => Some(TaskState::Completed),
            "failed" => Some(TaskState::Failed),
            "exception" => Some(TaskState::Exception),
            _ => None,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One unit of work, uniquely identified within a group.
///
/// Only `state` is mutable after first observation; the descriptive fields
/// are fixed at creation and never patched by later events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub task_id: TaskId,
    pub task_group_id: GroupId,
    pub name: String,
    pub state: TaskState,
}

impl Task {
    /// Minimal stand-in for a task first observed via a push event that
    /// carried no full payload.
    pub fn placeholder(task_id: TaskId, task_group_id: GroupId, state: TaskState) -> Self {
        Self {
            task_id,
            task_group_id,
            name: String::new(),
            state,
        }
    }
}

/// Pagination metadata attached to the ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub cursor: Cursor,
    pub next_cursor: Option<Cursor>,
    pub has_more: bool,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            cursor: INITIAL_CURSOR.to_string(),
            next_cursor: None,
            has_more: false,
        }
    }
}

/// One resolved page of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub page_info: PageInfo,
}

/// Action kinds this view knows how to invoke. Descriptors advertising any
/// other kind are excluded from the catalog.
pub const KNOWN_ACTION_KINDS: [&str; 2] = ["task", "hook"];

/// Specification of an invocable operation advertised for a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub name: String,
    pub title: String,
    pub kind: String,
    /// JSON schema describing the action's input, when it takes any.
    pub schema: Option<serde_json::Value>,
    /// Applicability restriction; only descriptors with an empty context
    /// are eligible for group-level invocation.
    pub context: Vec<String>,
}

/// Returns true when `id` looks like a real group identifier (a 22-character
/// URL-safe slug). Anything else is kept out of the recent-groups history.
pub fn is_valid_group_id(id: &str) -> bool {
    id.len() == 22
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_state_round_trips_through_wire_name() {
        for state in [
            TaskState::Unscheduled,
            TaskState::Pending,
            TaskState::Running,
            TaskState::Completed,
            TaskState::Failed,
            TaskState::Exception,
        ] {
            assert_eq!(TaskState::parse(state.as_str()), Some(state));
        }
        assert_eq!(TaskState::parse("cancelled"), None);
    }

    #[test]
    fn group_id_format_check() {
        assert!(is_valid_group_id("e6LWbpCsSdmlR-lhtVsPsg"));
        assert!(!is_valid_group_id("too-short"));
        assert!(!is_valid_group_id("has spaces in it oh no"));
        assert!(!is_valid_group_id(""));
    }
}
