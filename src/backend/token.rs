//! OAuth access tokens for the Logging API.
//!
//! Metadata-server tokens are cached until shortly before they expire, so a
//! query normally costs a single round trip to the Logging API. The cache is
//! refreshed under a lock; concurrent queries wait for one refresh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::Mutex;

use crate::backend::BackendError;

const METADATA_FLAVOR: &str = "Metadata-Flavor";
const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Tokens are refreshed this long before the server-reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Where bearer tokens come from.
#[derive(Clone)]
pub enum TokenSource {
    /// A token supplied through configuration.
    Static(String),
    /// The compute metadata server of the runtime (Cloud Run, GCE, GKE).
    Metadata {
        base_url: String,
        cache: Arc<Mutex<Option<CachedToken>>>,
    },
}

/// A metadata token and the instant it stops being reused.
#[derive(Clone)]
pub struct CachedToken {
    token: String,
    refresh_at: Instant,
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenSource::Static(_) => f.write_str("Static(<redacted>)"),
            TokenSource::Metadata { base_url, .. } => {
                f.debug_struct("Metadata").field("base_url", base_url).finish()
            }
        }
    }
}

#[derive(Deserialize)]
struct MetadataToken {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
}

impl TokenSource {
    /// Metadata-server source with an empty cache.
    pub fn metadata(base_url: impl Into<String>) -> Self {
        TokenSource::Metadata {
            base_url: base_url.into(),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Current bearer token, fetching a fresh one when the cache is stale.
    pub async fn token(&self, client: &reqwest::Client) -> Result<String, BackendError> {
        match self {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Metadata { base_url, cache } => {
                let mut cached = cache.lock().await;
                if let Some(entry) = cached.as_ref().filter(|c| Instant::now() < c.refresh_at) {
                    return Ok(entry.token.clone());
                }

                let fresh = fetch_metadata_token(client, base_url).await?;
                let lifetime = Duration::from_secs(fresh.expires_in).saturating_sub(EXPIRY_MARGIN);
                tracing::debug!(expires_in = fresh.expires_in, "Fetched access token from metadata server");

                *cached = Some(CachedToken {
                    token: fresh.access_token.clone(),
                    refresh_at: Instant::now() + lifetime,
                });
                Ok(fresh.access_token)
            }
        }
    }
}

async fn fetch_metadata_token(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<MetadataToken, BackendError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH);
    let resp = client
        .get(&url)
        .header(METADATA_FLAVOR, "Google")
        .send()
        .await
        .map_err(|e| BackendError::Auth(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(BackendError::Auth(format!(
            "metadata server returned {status}: {}",
            body.trim()
        )));
    }

    resp.json()
        .await
        .map_err(|e| BackendError::Auth(e.to_string()))
}

/// Ask the metadata server a plain-text question (e.g. the project id).
pub(crate) async fn metadata_text(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<String, BackendError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), path);
    let resp = client
        .get(&url)
        .header(METADATA_FLAVOR, "Google")
        .send()
        .await
        .map_err(|e| BackendError::Config(format!("metadata server unreachable: {e}")))?;

    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(BackendError::Config(format!(
            "metadata server returned {status} for {path}"
        )));
    }
    Ok(body.trim().to_string())
}
