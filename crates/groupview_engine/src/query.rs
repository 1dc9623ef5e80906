use std::time::Duration;

use crate::types::{map_reqwest_error, PageRequest, PageResponse, ServiceError};

/// Connection settings shared by all HTTP collaborators.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub(crate) fn build_client(settings: &ServiceSettings) -> Result<reqwest::Client, ServiceError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| ServiceError::Network(err.to_string()))
}

/// Page query interface: one request, one ordered page of tasks plus
/// pagination metadata.
#[async_trait::async_trait]
pub trait QueryClient: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, ServiceError>;
}

/// `QueryClient` over plain HTTP: `GET {base}/task-groups/{id}/tasks`.
#[derive(Debug, Clone)]
pub struct HttpQueryClient {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl HttpQueryClient {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = build_client(&settings)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl QueryClient for HttpQueryClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse, ServiceError> {
        let url = format!(
            "{}/task-groups/{}/tasks",
            self.settings.base_url, request.task_group_id
        );
        let mut parsed =
            reqwest::Url::parse(&url).map_err(|err| ServiceError::InvalidUrl(err.to_string()))?;
        {
            let mut query = parsed.query_pairs_mut();
            query.append_pair("limit", &request.page_size.to_string());
            if let Some(cursor) = &request.cursor {
                query.append_pair("cursor", cursor);
            }
            if let Some(previous_cursor) = &request.previous_cursor {
                query.append_pair("previousCursor", previous_cursor);
            }
            if request.include_actions {
                query.append_pair("includeActions", "true");
            }
        }

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

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body).map_err(|err| ServiceError::MalformedBody(err.to_string()))
    }
}
