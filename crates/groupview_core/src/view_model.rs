use crate::types::{GroupId, Task, TaskId, TaskState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupViewModel {
    pub group_id: GroupId,
    pub tasks: Vec<TaskRowView>,
    pub task_count: usize,
    /// True once every page of the active group has been merged.
    pub loaded: bool,
    pub warning: Option<String>,
    pub actions: Vec<ActionRowView>,
    pub dialog: DialogView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub task_id: TaskId,
    pub name: String,
    pub state: TaskState,
}

impl TaskRowView {
    pub(crate) fn from_task(task: &Task) -> Self {
        Self {
            task_id: task.task_id.clone(),
            name: task.name.clone(),
            state: task.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRowView {
    pub name: String,
    pub title: String,
    /// Selection is disabled while a submission is in flight.
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPhase {
    #[default]
    Idle,
    Open,
    Submitting,
    /// Submission failed; the dialog stays open with the error attached so
    /// the user can retry without re-selecting the action.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogView {
    pub phase: DialogPhase,
    pub title: Option<String>,
    pub input: Option<String>,
    pub error: Option<String>,
}
