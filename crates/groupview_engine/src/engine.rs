use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use tokio_util::sync::CancellationToken;
use view_logging::view_warn;

use crate::history::RecentGroupsStore;
use crate::query::{HttpQueryClient, QueryClient, ServiceSettings};
use crate::stream::{EventSink, EventSource, HttpEventSource, SUBSCRIPTION_KINDS};
use crate::submit::{ActionSubmitter, HttpActionSubmitter};
use crate::types::{PageRequest, PageResponse, ServiceError, StreamEvent, SubmitRequest};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub service: ServiceSettings,
    /// Directory holding the recent-groups history file.
    pub history_dir: PathBuf,
}

impl EngineConfig {
    pub fn default_with_history(history_dir: PathBuf) -> Self {
        Self {
            service: ServiceSettings::default(),
            history_dir,
        }
    }
}

enum EngineCommand {
    FetchPage(PageRequest),
    Subscribe { task_group_id: String },
    Unsubscribe,
    Submit(SubmitRequest),
    RecordHistory { task_group_id: String },
}

/// Everything the engine reports back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A page query resolved; the original request rides along so the core
    /// can run its identity and cursor checks.
    PageLoaded {
        request: PageRequest,
        response: PageResponse,
    },
    PageFailed {
        request: PageRequest,
        error: ServiceError,
    },
    TaskEvent(StreamEvent),
    /// The subscription ended on its own; absent error means the server
    /// closed the stream.
    StreamClosed {
        task_group_id: String,
        error: Option<ServiceError>,
    },
    ActionResolved {
        task_group_id: String,
        result: Result<String, ServiceError>,
    },
}

struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: StreamEvent) {
        let _ = self.tx.send(EngineEvent::TaskEvent(event));
    }
}

/// Channel-driven front door to the IO layer. Commands are executed on a
/// background thread owning a tokio runtime, one spawned task per command;
/// results come back through `try_recv`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ServiceError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let query: Arc<dyn QueryClient> = Arc::new(HttpQueryClient::new(config.service.clone())?);
        let source: Arc<dyn EventSource> =
            Arc::new(HttpEventSource::new(config.service.clone())?);
        let submitter: Arc<dyn ActionSubmitter> =
            Arc::new(HttpActionSubmitter::new(config.service.clone())?);
        let history = RecentGroupsStore::new(config.history_dir);

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // At most one subscription at a time; replaced on re-subscribe.
            let mut subscription: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::FetchPage(request) => {
                        let query = query.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let event = match query.fetch_page(&request).await {
                                Ok(response) => EngineEvent::PageLoaded { request, response },
                                Err(error) => EngineEvent::PageFailed { request, error },
                            };
                            let _ = event_tx.send(event);
                        });
                    }
                    EngineCommand::Subscribe { task_group_id } => {
                        if let Some(token) = subscription.take() {
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        subscription = Some(token.clone());

                        let source = source.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let sink = ChannelEventSink {
                                tx: event_tx.clone(),
                            };
                            let outcome = source
                                .run(&task_group_id, &SUBSCRIPTION_KINDS, &sink, token.clone())
                                .await;
                            // A cancelled run was superseded; stay quiet.
                            if token.is_cancelled() {
                                return;
                            }
                            let _ = event_tx.send(EngineEvent::StreamClosed {
                                task_group_id,
                                error: outcome.err(),
                            });
                        });
                    }
                    EngineCommand::Unsubscribe => {
                        if let Some(token) = subscription.take() {
                            token.cancel();
                        }
                    }
                    EngineCommand::Submit(request) => {
                        let submitter = submitter.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = submitter
                                .submit(&request)
                                .await
                                .map(|outcome| outcome.task_id);
                            let _ = event_tx.send(EngineEvent::ActionResolved {
                                task_group_id: request.task_group_id,
                                result,
                            });
                        });
                    }
                    EngineCommand::RecordHistory { task_group_id } => {
                        if let Err(err) = history.record(&task_group_id) {
                            view_warn!("Failed to record group history: {}", err);
                        }
                    }
                }
            }

            if let Some(token) = subscription.take() {
                token.cancel();
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_page(&self, request: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPage(request));
    }

    pub fn subscribe(&self, task_group_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Subscribe {
            task_group_id: task_group_id.into(),
        });
    }

    pub fn unsubscribe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Unsubscribe);
    }

    pub fn submit(&self, request: SubmitRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit(request));
    }

    pub fn record_history(&self, task_group_id: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::RecordHistory {
            task_group_id: task_group_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
