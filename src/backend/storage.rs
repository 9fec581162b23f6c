use crate::config::get_config;
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Buckets are private; everything shown on a card goes through a
/// short-lived signed URL.
pub const JOB_POSTER_BUCKET: &str = "job-posters";
pub const PROFILE_PHOTO_BUCKET: &str = "profile-photos";

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base: Url,
    headers: HeaderMap,
    ttl_secs: u32,
}

impl StorageClient {
    pub fn new(backend_url: &str, api_key: &str, ttl_secs: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;
        let mut normalized = backend_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base =
            Url::parse(&normalized).map_err(|e| Error::Config(format!("Invalid BACKEND_URL: {}", e)))?;
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| Error::Config("BACKEND_API_KEY contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(Self {
            client,
            base,
            headers,
            ttl_secs,
        })
    }

    pub fn from_config() -> Result<Self> {
        let config = get_config();
        Self::new(
            &config.backend_url,
            &config.backend_api_key,
            config.signed_url_ttl_secs,
        )
    }

    pub async fn create_signed_url(&self, bucket: &str, path: &str) -> Result<String> {
        let endpoint = self
            .base
            .join(&format!("storage/v1/object/sign/{}/{}", bucket, path))
            .map_err(|e| Error::Internal(format!("Bad signing URL for {}: {}", path, e)))?;
        let response = self
            .client
            .post(endpoint)
            .headers(self.headers.clone())
            .json(&serde_json::json!({ "expiresIn": self.ttl_secs }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                message,
            });
        }
        let signed: SignResponse = response.json().await?;
        // the signing endpoint answers with a path relative to the storage root
        let relative = signed.signed_url.trim_start_matches('/');
        let full = self
            .base
            .join(&format!("storage/v1/{}", relative))
            .map_err(|e| anyhow::anyhow!("Malformed signed URL in response: {}", e))?;
        Ok(full.to_string())
    }

    /// Best-effort media resolution for a card. External URLs pass
    /// through untouched; a failed signing degrades to no media rather
    /// than failing the deck load.
    pub async fn resolve_media(&self, bucket: &str, reference: &str) -> Option<String> {
        let path = match storage_object_path(reference, bucket) {
            Some(path) => path,
            None => return Some(reference.to_string()),
        };
        match self.create_signed_url(bucket, path).await {
            Ok(signed) => Some(signed),
            Err(e) => {
                warn!("Failed to sign {} object {}: {}", bucket, path, e);
                None
            }
        }
    }
}

/// Strips a full object URL down to the in-bucket path. Bare paths are
/// taken as already relative; URLs that never mention the bucket belong
/// to someone else's host and yield `None`.
pub fn storage_object_path<'a>(reference: &'a str, bucket: &str) -> Option<&'a str> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        let marker = format!("/{}/", bucket);
        return reference
            .find(&marker)
            .map(|i| &reference[i + marker.len()..]);
    }
    Some(reference.trim_start_matches('/'))
}
