use serde::Serialize;

use crate::query::{build_client, ServiceSettings};
use crate::types::{map_reqwest_error, ServiceError, SubmitOutcome, SubmitRequest};

/// Action submission collaborator: hands one invocation to the service and
/// yields the identifier of the task it produced.
#[async_trait::async_trait]
pub trait ActionSubmitter: Send + Sync {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitOutcome, ServiceError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    input: &'a str,
}

/// `ActionSubmitter` over plain HTTP:
/// `POST {base}/task-groups/{id}/actions/{name}`.
#[derive(Debug, Clone)]
pub struct HttpActionSubmitter {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpActionSubmitter {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl ActionSubmitter for HttpActionSubmitter {
    async fn submit(&self, request: &SubmitRequest) -> Result<SubmitOutcome, ServiceError> {
        let url = format!(
            "{}/task-groups/{}/actions/{}",
            self.settings.base_url, request.task_group_id, request.action_name
        );
        let parsed =
            reqwest::Url::parse(&url).map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;

        let body = serde_json::to_vec(&SubmitBody {
            input: &request.input,
        })
        .map_err(|err| ServiceError::MalformedBody(err.to_string()))?;

        let response = self
            .client
            .post(parsed)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| ServiceError::MalformedBody(err.to_string()))
    }
}
