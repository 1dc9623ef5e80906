use crate::catalog::derive_catalog;
use crate::types::{is_valid_group_id, CONTINUATION_PAGE_SIZE, INITIAL_PAGE_SIZE};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GroupSelected(group_id) => {
            if state.group_id == group_id {
                return (state, Vec::new());
            }

            // All per-group state is flushed synchronously, before any
            // request for the new group goes out, so a late response for the
            // old group can never be merged under the new identity.
            state.reset_for_group(group_id.clone());
            state.mark_dirty();

            let mut effects = Vec::with_capacity(3);
            if is_valid_group_id(&group_id) {
                effects.push(Effect::RecordGroupHistory {
                    group_id: group_id.clone(),
                });
            }
            effects.push(Effect::Subscribe {
                group_id: group_id.clone(),
            });
            effects.push(Effect::FetchPage {
                group_id,
                cursor: None,
                previous_cursor: None,
                page_size: INITIAL_PAGE_SIZE,
            });
            effects
        }
        Msg::PageResolved {
            group_id,
            request_cursor,
            page,
            actions,
        } => {
            // Identity guard: the response may belong to a group the user
            // has since navigated away from.
            if !state.accepts(&group_id) {
                return (state, Vec::new());
            }
            // Cursor echo check: a superseded in-flight request carries an
            // older cursor than the one most recently issued.
            if request_cursor != state.previous_cursor {
                return (state, Vec::new());
            }

            state.collection.merge_page(page.tasks, page.page_info);
            state.loaded = !state.collection.page_info().has_more;

            if let Some(actions) = actions {
                if let Some(catalog) =
                    derive_catalog(&state.previous_group_id, &state.group_id, &actions)
                {
                    state.catalog = catalog;
                    state.previous_group_id = state.group_id.clone();
                }
            }

            state.mark_dirty();
            continuation_effects(&mut state)
        }
        Msg::PageFailed { group_id, message } => {
            if !state.accepts(&group_id) {
                return (state, Vec::new());
            }
            state.warning = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TaskUpdated {
            group_id,
            task_id,
            state: task_state,
            task,
        } => {
            if !state.accepts(&group_id) {
                return (state, Vec::new());
            }
            state
                .collection
                .merge_live_update(&group_id, &task_id, task_state, task);
            state.mark_dirty();
            Vec::new()
        }
        Msg::StreamFailed { group_id, message } => {
            if !state.accepts(&group_id) {
                return (state, Vec::new());
            }
            state.warning = Some(message);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ActionSelected { name } => {
            // Selection is blocked while a submission is in flight.
            if state.dialog.is_submitting() || state.catalog.lookup(&name).is_none() {
                return (state, Vec::new());
            }
            state.dialog.open(name);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ActionInputChanged { name, input } => {
            if state.catalog.set_input(&name, input) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ActionSubmitClicked => {
            if state.dialog.is_submitting() {
                return (state, Vec::new());
            }
            let Some(action) = state
                .dialog
                .selected()
                .and_then(|name| state.catalog.lookup(name))
                .cloned()
            else {
                return (state, Vec::new());
            };
            let input = state
                .catalog
                .input(&action.name)
                .unwrap_or_default()
                .to_string();

            state.dialog.begin_submit();
            state.mark_dirty();
            vec![Effect::SubmitAction {
                group_id: state.group_id.clone(),
                action,
                input,
            }]
        }
        Msg::ActionResolved { result } => {
            // A resolution with nothing in flight is stale (e.g. the dialog
            // was closed underneath it) and has no observable effect.
            if !state.dialog.is_submitting() {
                return (state, Vec::new());
            }
            state.mark_dirty();
            match result {
                Ok(task_id) => {
                    state.dialog.close();
                    vec![Effect::NavigateToTask { task_id }]
                }
                Err(error) => {
                    state.dialog.fail(error);
                    Vec::new()
                }
            }
        }
        Msg::ActionDialogClosed => {
            state.dialog.close();
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Cursor controller trigger: after a merge updated the pagination metadata,
/// issue exactly one continuation request when more pages remain and the
/// page most recently asked for has been merged. `previous_cursor` advances
/// to the new request cursor before the response resolves, so the trigger
/// cannot re-fire for the same page.
fn continuation_effects(state: &mut AppState) -> Vec<Effect> {
    let page_info = state.collection.page_info();
    if !page_info.has_more || page_info.cursor != state.previous_cursor {
        return Vec::new();
    }
    let Some(next_cursor) = page_info.next_cursor.clone() else {
        // has_more without a continuation token; nothing useful to request.
        return Vec::new();
    };

    let effect = Effect::FetchPage {
        group_id: state.group_id.clone(),
        cursor: Some(next_cursor.clone()),
        previous_cursor: Some(page_info.cursor.clone()),
        page_size: CONTINUATION_PAGE_SIZE,
    };
    state.previous_cursor = next_cursor;
    vec![effect]
}
