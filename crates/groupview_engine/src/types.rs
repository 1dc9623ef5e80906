use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire representation of one task, as returned by page queries and
/// embedded in first-delivery push events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskNode {
    pub task_id: String,
    pub task_group_id: String,
    #[serde(default)]
    pub name: String,
    pub state: String,
}

/// Pagination metadata echoed by the page query service. `cursor` is absent
/// on the first page of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WirePageInfo {
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Wire representation of one advertised action descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionNode {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub schema: Option<serde_json::Value>,
    #[serde(default)]
    pub context: Vec<String>,
}

/// One page query. Carried back verbatim inside the engine's `PageLoaded`
/// event so the core can tell stale responses apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub task_group_id: String,
    pub page_size: u32,
    pub cursor: Option<String>,
    pub previous_cursor: Option<String>,
    /// The initial query of a group also asks for the action listing.
    pub include_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub tasks: Vec<TaskNode>,
    pub page_info: WirePageInfo,
    #[serde(default)]
    pub actions: Option<Vec<ActionNode>>,
}

/// One push-stream notification of a task state change. The full `task`
/// payload is present only the first time the stream delivers an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamEvent {
    pub task_group_id: String,
    pub task_id: String,
    pub state: String,
    #[serde(default)]
    pub task: Option<TaskNode>,
}

/// One action invocation handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub task_group_id: String,
    pub action_name: String,
    /// The user-edited input document, as YAML text.
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    MalformedBody(String),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    ServiceError::Network(err.to_string())
}
