use crate::types::{ActionDescriptor, Cursor, GroupId, TaskId};

/// Asynchronous work requested by `update`; executed by the shell's effect
/// runner, never by the core itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a page query. `cursor` is `None` for the initial page of a
    /// group; `previous_cursor` echoes the collection's current cursor on
    /// continuation requests.
    FetchPage {
        group_id: GroupId,
        cursor: Option<Cursor>,
        previous_cursor: Option<Cursor>,
        page_size: u32,
    },
    /// (Re-)establish the push-stream subscription for a group, tearing
    /// down any previous one.
    Subscribe { group_id: GroupId },
    /// Hand an action invocation to the submission collaborator.
    SubmitAction {
        group_id: GroupId,
        action: ActionDescriptor,
        input: String,
    },
    /// Downstream navigation to the task produced by a completed action.
    NavigateToTask { task_id: TaskId },
    /// Record a validated group id in the recent-groups history store.
    RecordGroupHistory { group_id: GroupId },
}
