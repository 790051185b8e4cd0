//! Remote data provider trait.

use crate::config::FetchFormat;
use crate::error::Result;
use crate::schema::DatasetKind;

/// One remote fetch: `GET <base>/resource/{resource_id}?format=&limit=&offset=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub dataset: DatasetKind,
    pub resource_id: String,
    pub format: FetchFormat,
    pub limit: usize,
    pub offset: usize,
}

/// Source of raw dataset payloads from a remote endpoint.
///
/// Implementations make exactly one attempt per call and must be
/// thread-safe so a provider can be shared by a server.
pub trait DataProvider: Send + Sync {
    /// Fetch the raw payload (CSV bytes or a JSON records envelope).
    ///
    /// Network errors, timeouts and non-2xx statuses are errors.
    fn fetch(&self, request: &ResourceRequest) -> Result<Vec<u8>>;

    /// Name of this provider (for logging).
    fn name(&self) -> &str;
}
