use crate::catalog::ActionCatalog;
use crate::collection::TaskCollection;
use crate::types::{Cursor, GroupId, INITIAL_CURSOR};
use crate::view_model::{DialogPhase, DialogView, GroupViewModel};

/// Selection, submission, and error state for the single action invocation
/// that may be in flight at any time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionDialog {
    selected: Option<String>,
    error: Option<String>,
    submitting: bool,
}

impl ActionDialog {
    pub fn phase(&self) -> DialogPhase {
        match (&self.selected, self.submitting, &self.error) {
            (None, _, _) => DialogPhase::Idle,
            (Some(_), true, _) => DialogPhase::Submitting,
            (Some(_), false, Some(_)) => DialogPhase::Error,
            (Some(_), false, None) => DialogPhase::Open,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn open(&mut self, name: String) {
        self.selected = Some(name);
        self.error = None;
        self.submitting = false;
    }

    pub(crate) fn begin_submit(&mut self) {
        self.error = None;
        self.submitting = true;
    }

    pub(crate) fn fail(&mut self, error: String) {
        self.error = Some(error);
        self.submitting = false;
    }

    pub(crate) fn close(&mut self) {
        self.selected = None;
        self.error = None;
        self.submitting = false;
    }
}

/// Whole-view state: the merged task collection for the active group plus
/// the cursor controller, action catalog, and dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Group the user is currently looking at; empty until the first
    /// `GroupSelected`.
    pub(crate) group_id: GroupId,
    /// Group the current catalog was derived for; the derivation gate.
    pub(crate) previous_group_id: GroupId,
    pub(crate) collection: TaskCollection,
    /// Cursor used for the most recently issued page request.
    pub(crate) previous_cursor: Cursor,
    pub(crate) catalog: ActionCatalog,
    pub(crate) dialog: ActionDialog,
    /// Advisory query/subscription-layer failure; partial data keeps
    /// rendering alongside it.
    pub(crate) warning: Option<String>,
    /// True once the collection holds every page of the active group.
    pub(crate) loaded: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            group_id: GroupId::new(),
            previous_group_id: GroupId::new(),
            collection: TaskCollection::new(),
            previous_cursor: INITIAL_CURSOR.to_string(),
            catalog: ActionCatalog::empty(),
            dialog: ActionDialog::default(),
            warning: None,
            loaded: false,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    /// Group-identity guard: does a result batch issued for `group_id` still
    /// belong to the currently active group?
    pub(crate) fn accepts(&self, group_id: &str) -> bool {
        !self.group_id.is_empty() && self.group_id == group_id
    }

    /// Flushes all per-group state ahead of the first request for a newly
    /// selected group.
    pub(crate) fn reset_for_group(&mut self, group_id: GroupId) {
        self.group_id = group_id;
        self.collection.reset();
        self.previous_cursor = INITIAL_CURSOR.to_string();
        self.dialog.close();
        self.warning = None;
        self.loaded = false;
    }

    pub fn view(&self) -> GroupViewModel {
        let title = self
            .dialog
            .selected()
            .and_then(|name| self.catalog.lookup(name))
            .map(|action| action.title.clone());
        let input = self
            .dialog
            .selected()
            .and_then(|name| self.catalog.input(name))
            .map(ToOwned::to_owned);

        GroupViewModel {
            group_id: self.group_id.clone(),
            tasks: self
                .collection
                .tasks()
                .iter()
                .map(crate::view_model::TaskRowView::from_task)
                .collect(),
            task_count: self.collection.len(),
            loaded: self.loaded,
            warning: self.warning.clone(),
            actions: self
                .catalog
                .entries()
                .iter()
                .map(|action| crate::view_model::ActionRowView {
                    name: action.name.clone(),
                    title: action.title.clone(),
                    disabled: self.dialog.is_submitting(),
                })
                .collect(),
            dialog: DialogView {
                phase: self.dialog.phase(),
                title,
                input,
                error: self.dialog.error().map(ToOwned::to_owned),
            },
        }
    }

    /// Returns the dirty flag and clears it; the shell re-renders only when
    /// this was set since the last render.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
