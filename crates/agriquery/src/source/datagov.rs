//! HTTP provider for the data.gov.in resource API.

use reqwest::blocking::Client;

use super::provider::{DataProvider, ResourceRequest};
use crate::config::SourceConfig;
use crate::error::{AgriError, Result};

/// Fetches resources from `GET <base>/resource/{id}`.
pub struct DataGovProvider {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl DataGovProvider {
    /// Create a provider from source configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgriError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// URL of a resource, without query parameters.
    pub fn resource_url(&self, resource_id: &str) -> String {
        format!("{}/resource/{}", self.api_base, resource_id)
    }
}

impl DataProvider for DataGovProvider {
    fn fetch(&self, request: &ResourceRequest) -> Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AgriError::Config("DATA_GOV_API_KEY is not set".to_string()))?;

        let limit = request.limit.to_string();
        let offset = request.offset.to_string();
        let response = self
            .client
            .get(self.resource_url(&request.resource_id))
            .query(&[
                ("api-key", api_key),
                ("format", request.format.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AgriError::Http(format!("request for {} timed out", request.dataset))
                } else {
                    AgriError::Http(format!("request for {} failed: {}", request.dataset, e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AgriError::Http(format!(
                "{} endpoint returned {}: {}",
                request.dataset,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| AgriError::Http(format!("failed to read {} response: {}", request.dataset, e)))?;

        Ok(bytes.to_vec())
    }

    fn name(&self) -> &str {
        "data.gov.in"
    }
}
