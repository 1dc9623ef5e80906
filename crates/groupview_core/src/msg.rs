use crate::types::{ActionDescriptor, Cursor, GroupId, Task, TaskId, TaskPage, TaskState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User navigated to (or searched for) a group.
    GroupSelected(GroupId),
    /// A page query resolved. Carries the group id and cursor of the
    /// original request so stale responses can be discarded.
    PageResolved {
        group_id: GroupId,
        /// Echo of the cursor the request was issued with; the sentinel
        /// `INITIAL_CURSOR` for the first page of a group.
        request_cursor: Cursor,
        page: TaskPage,
        /// Context-free candidate actions advertised for the group; present
        /// only on responses that include the action listing.
        actions: Option<Vec<ActionDescriptor>>,
    },
    /// A page query failed at the query layer.
    PageFailed { group_id: GroupId, message: String },
    /// Push-stream notification of a single task's state change.
    TaskUpdated {
        group_id: GroupId,
        task_id: TaskId,
        state: TaskState,
        /// Full task payload, present only the first time the push stream
        /// delivers this identifier.
        task: Option<Task>,
    },
    /// The push-stream subscription broke down.
    StreamFailed { group_id: GroupId, message: String },
    /// User picked an action from the catalog by name.
    ActionSelected { name: String },
    /// User edited the input document for an action.
    ActionInputChanged { name: String, input: String },
    /// User confirmed the currently open action dialog.
    ActionSubmitClicked,
    /// The submission collaborator resolved or rejected.
    ActionResolved { result: Result<TaskId, String> },
    /// User cancelled/closed the action dialog.
    ActionDialogClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}
