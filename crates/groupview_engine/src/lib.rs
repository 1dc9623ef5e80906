//! Groupview engine: IO layer and effect execution.
mod engine;
mod history;
mod query;
mod stream;
mod submit;
mod types;

pub use engine::{EngineConfig, EngineEvent, EngineHandle};
pub use history::{HistoryError, RecentGroupsStore};
pub use query::{HttpQueryClient, QueryClient, ServiceSettings};
pub use stream::{EventSink, EventSource, HttpEventSource, SUBSCRIPTION_KINDS};
pub use submit::{ActionSubmitter, HttpActionSubmitter};
pub use types::{
    ActionNode, PageRequest, PageResponse, ServiceError, StreamEvent, SubmitOutcome,
    SubmitRequest, TaskNode, WirePageInfo,
};
