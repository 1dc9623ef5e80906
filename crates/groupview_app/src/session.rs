use groupview_core::{
    ActionDescriptor, Effect, Msg, PageInfo, Task, TaskPage, TaskState, INITIAL_CURSOR,
};
use groupview_engine::{
    ActionNode, EngineConfig, EngineEvent, EngineHandle, PageRequest, ServiceError, StreamEvent,
    SubmitRequest, TaskNode, WirePageInfo,
};
use view_logging::{view_info, view_warn};

/// Bridges the pure core and the IO engine: effects go out as engine
/// commands, engine events come back as core messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            engine: EngineHandle::new(config)?,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    group_id,
                    cursor,
                    previous_cursor,
                    page_size,
                } => {
                    self.engine.fetch_page(PageRequest {
                        task_group_id: group_id,
                        page_size,
                        // The first page of a group also asks for the action
                        // listing; continuations don't.
                        include_actions: cursor.is_none(),
                        cursor,
                        previous_cursor,
                    });
                }
                Effect::Subscribe { group_id } => {
                    self.engine.subscribe(group_id);
                }
                Effect::SubmitAction {
                    group_id,
                    action,
                    input,
                } => {
                    view_info!("Submitting action {} for group {}", action.name, group_id);
                    self.engine.submit(SubmitRequest {
                        task_group_id: group_id,
                        action_name: action.name,
                        input,
                    });
                }
                Effect::NavigateToTask { task_id } => {
                    // Navigation belongs to an external router; the headless
                    // shell only announces the signal.
                    println!("navigate: /tasks/{task_id}");
                }
                Effect::RecordGroupHistory { group_id } => {
                    self.engine.record_history(group_id);
                }
            }
        }
    }

    /// One pending engine event, translated for the core.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_engine_event)
    }
}

fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageLoaded { request, response } => Msg::PageResolved {
            group_id: request.task_group_id.clone(),
            request_cursor: request
                .cursor
                .clone()
                .unwrap_or_else(|| INITIAL_CURSOR.to_string()),
            page: TaskPage {
                tasks: response.tasks.into_iter().filter_map(map_task).collect(),
                page_info: map_page_info(response.page_info),
            },
            actions: response
                .actions
                .map(|actions| actions.into_iter().map(map_action).collect()),
        },
        EngineEvent::PageFailed { request, error } => Msg::PageFailed {
            group_id: request.task_group_id,
            message: error.to_string(),
        },
        EngineEvent::TaskEvent(event) => map_stream_event(event),
        EngineEvent::StreamClosed {
            task_group_id,
            error,
        } => Msg::StreamFailed {
            group_id: task_group_id,
            message: error
                .map(|err| err.to_string())
                .unwrap_or_else(|| "event stream closed".to_string()),
        },
        EngineEvent::ActionResolved { result, .. } => Msg::ActionResolved {
            result: result.map_err(|err| err.to_string()),
        },
    }
}

fn map_stream_event(event: StreamEvent) -> Msg {
    let Some(state) = TaskState::parse(&event.state) else {
        view_warn!(
            "Dropping event with unknown task state {} for {}",
            event.state,
            event.task_id
        );
        return Msg::NoOp;
    };
    Msg::TaskUpdated {
        group_id: event.task_group_id,
        task_id: event.task_id,
        state,
        task: event.task.and_then(map_task),
    }
}

fn map_task(node: TaskNode) -> Option<Task> {
    let Some(state) = TaskState::parse(&node.state) else {
        view_warn!(
            "Dropping task {} with unknown state {}",
            node.task_id,
            node.state
        );
        return None;
    };
    Some(Task {
        task_id: node.task_id,
        task_group_id: node.task_group_id,
        name: node.name,
        state,
    })
}

fn map_page_info(info: WirePageInfo) -> PageInfo {
    PageInfo {
        cursor: info.cursor.unwrap_or_else(|| INITIAL_CURSOR.to_string()),
        next_cursor: info.next_cursor,
        has_more: info.has_more,
    }
}

fn map_action(node: ActionNode) -> ActionDescriptor {
    ActionDescriptor {
        name: node.name,
        title: node.title,
        kind: node.kind,
        schema: node.schema,
        context: node.context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupview_engine::PageResponse;
    use pretty_assertions::assert_eq;

    fn node(id: &str, state: &str) -> TaskNode {
        TaskNode {
            task_id: id.to_string(),
            task_group_id: "g1".to_string(),
            name: String::new(),
            state: state.to_string(),
        }
    }

    #[test]
    fn initial_page_is_mapped_with_sentinel_cursor() {
        let msg = map_engine_event(EngineEvent::PageLoaded {
            request: PageRequest {
                task_group_id: "g1".to_string(),
                page_size: 20,
                cursor: None,
                previous_cursor: None,
                include_actions: true,
            },
            response: PageResponse {
                tasks: vec![node("t1", "pending")],
                page_info: WirePageInfo::default(),
                actions: None,
            },
        });

        match msg {
            Msg::PageResolved {
                group_id,
                request_cursor,
                page,
                ..
            } => {
                assert_eq!(group_id, "g1");
                assert_eq!(request_cursor, INITIAL_CURSOR);
                assert_eq!(page.page_info.cursor, INITIAL_CURSOR);
                assert_eq!(page.tasks[0].state, TaskState::Pending);
            }
            other => panic!("expected PageResolved, got {other:?}"),
        }
    }

    #[test]
    fn unknown_task_state_in_page_is_dropped() {
        let msg = map_engine_event(EngineEvent::PageLoaded {
            request: PageRequest {
                task_group_id: "g1".to_string(),
                page_size: 20,
                cursor: Some("c1".to_string()),
                previous_cursor: Some(INITIAL_CURSOR.to_string()),
                include_actions: false,
            },
            response: PageResponse {
                tasks: vec![node("t1", "pending"), node("t2", "weird")],
                page_info: WirePageInfo::default(),
                actions: None,
            },
        });

        match msg {
            Msg::PageResolved { page, .. } => {
                assert_eq!(page.tasks.len(), 1);
                assert_eq!(page.tasks[0].task_id, "t1");
            }
            other => panic!("expected PageResolved, got {other:?}"),
        }
    }

    #[test]
    fn unknown_state_in_stream_event_becomes_noop() {
        let msg = map_engine_event(EngineEvent::TaskEvent(StreamEvent {
            task_group_id: "g1".to_string(),
            task_id: "t1".to_string(),
            state: "weird".to_string(),
            task: None,
        }));
        assert_eq!(msg, Msg::NoOp);
    }
}
