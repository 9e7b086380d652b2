//! HTTP implementation of the ImageStore trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

use dm_common::config::ImageStoreConfig;
use dm_core::error::DomainError;
use dm_core::traits::ImageStore;

/// Image store client backed by an HTTP hosting service
#[derive(Debug, Clone)]
pub struct HttpImageStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadRequest<'a> {
    file: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    url: &'a str,
}

impl HttpImageStore {
    /// Create a new client from configuration
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built
    pub fn new(config: &ImageStoreConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::ImageStoreError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn images_endpoint(&self) -> String {
        format!("{}/images", self.base_url)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    #[instrument(skip(self, data_uri))]
    async fn upload(&self, data_uri: &str) -> Result<String, DomainError> {
        let response = self
            .with_auth(self.client.post(self.images_endpoint()))
            .json(&UploadRequest { file: data_uri })
            .send()
            .await
            .map_err(|e| DomainError::ImageStoreError(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::ImageStoreError(format!(
                "upload rejected with status {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| DomainError::ImageStoreError(format!("invalid upload response: {e}")))?;

        tracing::debug!(url = %body.url, "Image uploaded");
        Ok(body.url)
    }

    #[instrument(skip(self))]
    async fn delete(&self, url: &str) -> Result<(), DomainError> {
        let response = self
            .with_auth(self.client.delete(self.images_endpoint()))
            .json(&DeleteRequest { url })
            .send()
            .await
            .map_err(|e| DomainError::ImageStoreError(format!("delete request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::ImageStoreError(format!(
                "delete rejected with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
