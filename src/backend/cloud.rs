//! Cloud Logging REST client.
//!
//! # Responsibilities
//! - Build the `entries:list` request for one page of results
//! - Attach a bearer token from the configured `TokenSource`
//! - Map error bodies to `BackendError::Api` with the backend's own message

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::entry::{BackendEntry, ListEntriesResponse};
use crate::backend::token::{metadata_text, TokenSource};
use crate::backend::{BackendError, ListEntriesRequest, LogBackend};
use crate::config::BackendConfig;

const PROJECT_ID_PATH: &str = "/computeMetadata/v1/project/project-id";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListEntriesBody<'a> {
    resource_names: [String; 1],
    filter: &'a str,
    order_by: &'a str,
    page_size: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

/// Logging API client bound to one project.
#[derive(Debug, Clone)]
pub struct CloudLoggingClient {
    client: reqwest::Client,
    endpoint: String,
    resource_name: String,
    tokens: TokenSource,
}

impl CloudLoggingClient {
    /// Create a client for `project_id`.
    pub fn new(config: &BackendConfig, project_id: &str) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_client(client, config, project_id)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(
        client: reqwest::Client,
        config: &BackendConfig,
        project_id: &str,
    ) -> Result<Self, BackendError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(BackendError::Config("project id must be non-empty".into()));
        }

        let tokens = match config.access_token.as_deref() {
            Some(token) if !token.is_empty() => TokenSource::Static(token.to_string()),
            _ => TokenSource::metadata(config.metadata_url.clone()),
        };

        Ok(Self {
            client,
            endpoint: format!("{}/v2/entries:list", config.base_url.trim_end_matches('/')),
            resource_name: format!("projects/{project_id}"),
            tokens,
        })
    }

    /// Fully-qualified `entries:list` URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, request: ListEntriesRequest) -> Result<Vec<BackendEntry>, BackendError> {
        let token = self.tokens.token(&self.client).await?;
        let body = ListEntriesBody {
            resource_names: [self.resource_name.clone()],
            filter: &request.filter,
            order_by: &request.order_by,
            page_size: request.page_size,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
                _ if !text.trim().is_empty() => text.trim().to_string(),
                _ => format!("log backend returned {status}"),
            };
            tracing::debug!(status = %status, message = %message, "Log backend rejected query");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let page: ListEntriesResponse = resp.json().await?;
        if page.next_page_token.is_some() {
            tracing::debug!(returned = page.entries.len(), "Further pages available, not fetched");
        }
        Ok(page.entries)
    }
}

impl LogBackend for CloudLoggingClient {
    fn list_entries(
        &self,
        request: ListEntriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BackendEntry>, BackendError>> + Send + '_>> {
        Box::pin(self.fetch(request))
    }
}

/// Project to query: configured value, else the metadata server's answer.
pub async fn resolve_project_id(config: &BackendConfig) -> Result<String, BackendError> {
    if let Some(id) = config.project_id.as_deref().filter(|id| !id.trim().is_empty()) {
        return Ok(id.trim().to_string());
    }

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| BackendError::Config(e.to_string()))?;
    let id = metadata_text(&client, &config.metadata_url, PROJECT_ID_PATH).await?;
    if id.is_empty() {
        return Err(BackendError::Config("metadata server returned an empty project id".into()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url() {
        let mut config = BackendConfig::default();
        config.base_url = "http://127.0.0.1:9999/".into();
        config.access_token = Some("t".into());
        let client = CloudLoggingClient::new(&config, "proj").unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9999/v2/entries:list");
    }

    #[test]
    fn blank_project_id_is_rejected() {
        let err = CloudLoggingClient::new(&BackendConfig::default(), "  ").unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn request_body_uses_api_field_names() {
        let body = ListEntriesBody {
            resource_names: ["projects/p".into()],
            filter: "severity>=ERROR",
            order_by: "timestamp desc",
            page_size: 10,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "resourceNames": ["projects/p"],
                "filter": "severity>=ERROR",
                "orderBy": "timestamp desc",
                "pageSize": 10
            })
        );
    }

    #[tokio::test]
    async fn configured_project_id_skips_metadata_server() {
        let mut config = BackendConfig::default();
        config.project_id = Some(" acme ".into());
        assert_eq!(resolve_project_id(&config).await.unwrap(), "acme");
    }
}
