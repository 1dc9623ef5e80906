use std::collections::HashSet;

use crate::types::{GroupId, PageInfo, Task, TaskId, TaskState};

/// Append-ordered collection of tasks plus the identity ledger that keeps it
/// duplicate-free.
///
/// The ledger is owned and mutated exclusively here: an identifier is a
/// member of `seen` if and only if the corresponding task is present in
/// `tasks`. Insertion order reflects arrival order of first observation,
/// regardless of whether a task was first seen via a page fetch or a push
/// event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    seen: HashSet<TaskId>,
    page_info: PageInfo,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all tasks, the ledger, and pagination metadata. Called on
    /// every group transition before any request for the new group is issued.
    pub fn reset(&mut self) {
        self.tasks.clear();
        self.seen.clear();
        self.page_info = PageInfo::default();
    }

    /// Merges one resolved page: unseen tasks are appended in order, tasks
    /// already in the ledger are dropped from the batch, and the pagination
    /// metadata is replaced wholesale. Returns how many tasks were appended.
    ///
    /// Idempotent under re-delivery of the same batch.
    pub fn merge_page(&mut self, tasks: Vec<Task>, page_info: PageInfo) -> usize {
        let mut appended = 0;
        for task in tasks {
            if self.seen.insert(task.task_id.clone()) {
                self.tasks.push(task);
                appended += 1;
            }
        }
        self.page_info = page_info;
        appended
    }

    /// Merges one push-stream event: patch-if-known, append-if-new.
    ///
    /// A known identifier has only its state replaced, keeping its position
    /// and descriptive fields. An unknown identifier is appended, built from
    /// the event payload when present or from a minimal placeholder when the
    /// event arrived without one (tolerated out-of-order delivery). Returns
    /// true when the event appended a new task.
    pub fn merge_live_update(
        &mut self,
        group_id: &GroupId,
        task_id: &TaskId,
        state: TaskState,
        payload: Option<Task>,
    ) -> bool {
        if self.seen.contains(task_id) {
            if let Some(task) = self.tasks.iter_mut().find(|t| &t.task_id == task_id) {
                task.state = state;
            }
            return false;
        }

        let mut task = payload
            .unwrap_or_else(|| Task::placeholder(task_id.clone(), group_id.clone(), state));
        task.state = state;
        self.seen.insert(task.task_id.clone());
        self.tasks.push(task);
        true
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.seen.contains(task_id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
