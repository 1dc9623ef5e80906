use std::sync::Once;

use groupview_core::{
    update, AppState, Effect, Msg, PageInfo, Task, TaskPage, TaskState, INITIAL_CURSOR,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(view_logging::initialize_for_tests);
}

const GROUP: &str = "e6LWbpCsSdmlR-lhtVsPsg";

fn task(id: &str, state: TaskState) -> Task {
    Task {
        task_id: id.to_string(),
        task_group_id: GROUP.to_string(),
        name: format!("build-{id}"),
        state,
    }
}

fn final_page(tasks: Vec<Task>) -> Msg {
    Msg::PageResolved {
        group_id: GROUP.to_string(),
        request_cursor: INITIAL_CURSOR.to_string(),
        page: TaskPage {
            tasks,
            page_info: PageInfo::default(),
        },
        actions: None,
    }
}

fn select_group(state: AppState) -> AppState {
    let (state, _effects) = update(state, Msg::GroupSelected(GROUP.to_string()));
    state
}

#[test]
fn page_merge_appends_in_arrival_order() {
    init_logging();
    let state = select_group(AppState::new());

    let (state, effects) = update(
        state,
        final_page(vec![task("t1", TaskState::Pending), task("t2", TaskState::Pending)]),
    );

    assert!(effects.is_empty());
    let view = state.view();
    let ids: Vec<_> = view.tasks.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"]);
    assert!(view.loaded);
}

#[test]
fn redelivered_batch_is_idempotent() {
    init_logging();
    let state = select_group(AppState::new());
    let batch = vec![task("t1", TaskState::Pending), task("t2", TaskState::Running)];

    let (state, _effects) = update(state, final_page(batch.clone()));
    let (state, _effects) = update(state, final_page(batch));

    assert_eq!(state.view().task_count, 2);
}

#[test]
fn live_update_patches_state_in_place() {
    let state = select_group(AppState::new());
    let (state, _effects) = update(
        state,
        final_page(vec![task("t1", TaskState::Pending), task("t2", TaskState::Pending)]),
    );

    let (state, effects) = update(
        state,
        Msg::TaskUpdated {
            group_id: GROUP.to_string(),
            task_id: "t1".to_string(),
            state: TaskState::Running,
            task: None,
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    let ids: Vec<_> = view.tasks.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2"], "patch must not reorder");
    assert_eq!(view.tasks[0].state, TaskState::Running);
    assert_eq!(view.tasks[0].name, "build-t1", "descriptive fields untouched");
}

#[test]
fn live_update_appends_unknown_task_from_payload() {
    let state = select_group(AppState::new());
    let (state, _effects) = update(state, final_page(vec![task("t1", TaskState::Pending)]));

    let (state, _effects) = update(
        state,
        Msg::TaskUpdated {
            group_id: GROUP.to_string(),
            task_id: "t9".to_string(),
            state: TaskState::Pending,
            task: Some(task("t9", TaskState::Unscheduled)),
        },
    );

    let view = state.view();
    assert_eq!(view.task_count, 2);
    assert_eq!(view.tasks[1].task_id, "t9");
    // The event's state wins over the payload's snapshot.
    assert_eq!(view.tasks[1].state, TaskState::Pending);
}

#[test]
fn payloadless_unknown_event_appends_placeholder() {
    let state = select_group(AppState::new());

    let (state, _effects) = update(
        state,
        Msg::TaskUpdated {
            group_id: GROUP.to_string(),
            task_id: "t3".to_string(),
            state: TaskState::Running,
            task: None,
        },
    );

    let view = state.view();
    assert_eq!(view.task_count, 1);
    assert_eq!(view.tasks[0].task_id, "t3");
    assert_eq!(view.tasks[0].state, TaskState::Running);
    assert!(view.tasks[0].name.is_empty());
}

// The interleaving from the scenario table: page, patch, push-append, then a
// page that re-delivers both identifiers.
#[test]
fn page_and_push_interleaving_commutes() {
    init_logging();
    let state = select_group(AppState::new());

    let (state, _effects) = update(state, final_page(vec![task("t1", TaskState::Pending)]));
    let (state, _effects) = update(
        state,
        Msg::TaskUpdated {
            group_id: GROUP.to_string(),
            task_id: "t1".to_string(),
            state: TaskState::Running,
            task: None,
        },
    );
    let (state, _effects) = update(
        state,
        Msg::TaskUpdated {
            group_id: GROUP.to_string(),
            task_id: "t2".to_string(),
            state: TaskState::Pending,
            task: Some(task("t2", TaskState::Pending)),
        },
    );
    let (state, _effects) = update(
        state,
        final_page(vec![task("t1", TaskState::Pending), task("t2", TaskState::Pending)]),
    );

    let view = state.view();
    let rows: Vec<_> = view
        .tasks
        .iter()
        .map(|t| (t.task_id.as_str(), t.state))
        .collect();
    assert_eq!(
        rows,
        vec![("t1", TaskState::Running), ("t2", TaskState::Pending)]
    );
}

#[test]
fn merge_marks_state_dirty_for_render() {
    let mut state = select_group(AppState::new());
    assert!(state.consume_dirty());

    let (mut state, _effects) = update(state, final_page(vec![task("t1", TaskState::Pending)]));
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn noop_produces_no_effects() {
    let state = AppState::new();
    let (_state, effects) = update(state, Msg::NoOp);
    assert_eq!(effects, Vec::<Effect>::new());
}
