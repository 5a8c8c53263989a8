use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryLogsRequest {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub severity: String,
    pub message: Value,
    pub resource: Value,
    pub insert_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogsResponse {
    pub service: String,
    pub count: usize,
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// The service answered with a non-2xx status. `body` is the raw error envelope.
    #[error("Log Endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The error envelope as JSON, when the service sent one.
    pub fn envelope(&self) -> Option<Value> {
        match self {
            ClientError::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

pub struct LogEndpointClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl LogEndpointClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Query logs for one service.
    pub async fn query_logs(&self, req: &QueryLogsRequest) -> Result<QueryLogsResponse, ClientError> {
        let resp = self
            .client
            .post(format!("{}/query-logs", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(req)
            .send()
            .await?;

        let text = checked(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Service identity and endpoint list.
    pub async fn status(&self) -> Result<Value, ClientError> {
        let resp = self.client.get(format!("{}/", self.base_url)).send().await?;
        let text = checked(resp).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Usage guide: markdown when the service ships one, otherwise JSON text.
    pub async fn help(&self) -> Result<String, ClientError> {
        let resp = self.client.get(format!("{}/help", self.base_url)).send().await?;
        checked(resp).await
    }
}

async fn checked(resp: Response) -> Result<String, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status { status, body: text });
    }
    Ok(text)
}
