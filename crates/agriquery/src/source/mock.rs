//! Mock data provider for testing and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::provider::{DataProvider, ResourceRequest};
use crate::error::{AgriError, Result};
use crate::schema::DatasetKind;

/// Scripted outcome of a fetch.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return these bytes as the payload.
    Payload(Vec<u8>),
    /// Fail as if the request timed out.
    Timeout,
    /// Fail as if the endpoint returned this status.
    Status(u16),
}

/// Provider returning scripted responses per dataset.
///
/// Datasets without a scripted response time out.
#[derive(Debug, Default)]
pub struct MockProvider {
    responses: HashMap<DatasetKind, MockResponse>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a provider where every fetch times out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for a dataset.
    pub fn with_response(mut self, dataset: DatasetKind, response: MockResponse) -> Self {
        self.responses.insert(dataset, response);
        self
    }

    /// Script a successful payload for a dataset.
    pub fn with_payload(self, dataset: DatasetKind, payload: impl Into<Vec<u8>>) -> Self {
        self.with_response(dataset, MockResponse::Payload(payload.into()))
    }

    /// Number of fetches attempted so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DataProvider for MockProvider {
    fn fetch(&self, request: &ResourceRequest) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.get(&request.dataset) {
            Some(MockResponse::Payload(bytes)) => Ok(bytes.clone()),
            Some(MockResponse::Status(code)) => Err(AgriError::Http(format!(
                "{} endpoint returned {}",
                request.dataset, code
            ))),
            Some(MockResponse::Timeout) | None => Err(AgriError::Http(format!(
                "request for {} timed out",
                request.dataset
            ))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
