//! Groupview core: pure state machine for the live task-group view.
mod catalog;
mod collection;
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use catalog::{default_input_document, derive_catalog, ActionCatalog};
pub use collection::TaskCollection;
pub use effect::Effect;
pub use msg::Msg;
pub use state::{ActionDialog, AppState};
pub use types::{
    is_valid_group_id, ActionDescriptor, Cursor, GroupId, PageInfo, Task, TaskId, TaskPage,
    TaskState, CONTINUATION_PAGE_SIZE, INITIAL_CURSOR, INITIAL_PAGE_SIZE, KNOWN_ACTION_KINDS,
};
pub use update::update;
pub use view_model::{ActionRowView, DialogPhase, DialogView, GroupViewModel, TaskRowView};
