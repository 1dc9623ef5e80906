use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use view_logging::view_warn;

use crate::query::{build_client, ServiceSettings};
use crate::types::{map_reqwest_error, ServiceError, StreamEvent};

/// Event kinds every subscription asks for.
pub const SUBSCRIPTION_KINDS: [&str; 6] = [
    "tasksDefined",
    "tasksPending",
    "tasksRunning",
    "tasksCompleted",
    "tasksFailed",
    "tasksException",
];

/// Receives decoded push-stream events as they arrive.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StreamEvent);
}

/// Push-stream interface: runs one subscription until the stream ends or
/// the token is cancelled.
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    async fn run(
        &self,
        task_group_id: &str,
        kinds: &[&str],
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), ServiceError>;
}

/// `EventSource` reading line-delimited JSON from a streaming HTTP response:
/// `GET {base}/task-groups/{id}/events?kinds=...`.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpEventSource {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl EventSource for HttpEventSource {
    async fn run(
        &self,
        task_group_id: &str,
        kinds: &[&str],
        sink: &dyn EventSink,
        cancel: CancellationToken,
    ) -> Result<(), ServiceError> {
        let url = format!(
            "{}/task-groups/{}/events",
            self.settings.base_url, task_group_id
        );
        let mut parsed =
            reqwest::Url::parse(&url).map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;
        parsed
            .query_pairs_mut()
            .append_pair("kinds", &kinds.join(","));

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus(status.as_u16()));
        }

        let mut buffer = Vec::new();
        let mut stream = response.bytes_stream();
        loop {
            let chunk = tokio::select! {
                // Teardown wins over a ready chunk.
                biased;
                () = cancel.cancelled() => return Ok(()),
                chunk = stream.next() => match chunk {
                    Some(chunk) => chunk.map_err(map_reqwest_error)?,
                    None => break,
                },
            };

            buffer.extend_from_slice(&chunk);
            while let Some(newline) = buffer.iter().position(|&b| b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=newline).collect();
                emit_line(&line[..line.len() - 1], sink);
            }
        }
        if !buffer.is_empty() {
            emit_line(&buffer, sink);
        }

        Ok(())
    }
}

/// Decodes one framed line; malformed lines are logged and skipped so a
/// single bad event cannot kill the subscription.
fn emit_line(line: &[u8], sink: &dyn EventSink) {
    let trimmed = line.strip_suffix(b"\r").unwrap_or(line);
    if trimmed.is_empty() {
        return;
    }
    match serde_json::from_slice::<StreamEvent>(trimmed) {
        Ok(event) => sink.emit(event),
        Err(err) => view_warn!("Dropping undecodable stream event: {}", err),
    }
}
