//! Data source configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AgriError, Result};
use crate::schema::DatasetKind;

/// Default open-data API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.data.gov.in";

/// Payload format requested from the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchFormat {
    #[default]
    Csv,
    Json,
}

impl FetchFormat {
    /// Query-string value and cache file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchFormat::Csv => "csv",
            FetchFormat::Json => "json",
        }
    }

    /// Infer the format of a cached file from its extension.
    pub fn from_path(path: &Path) -> FetchFormat {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FetchFormat::Json,
            _ => FetchFormat::Csv,
        }
    }
}

/// Where one dataset can be obtained.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Remote resource id (None = remote tier disabled).
    pub resource_id: Option<String>,
    /// Cache file stem inside the cache directory.
    pub cache_name: String,
    /// Bundled local fallback file.
    pub local_path: PathBuf,
}

impl DatasetConfig {
    /// Default configuration for a dataset kind.
    pub fn for_kind(kind: DatasetKind) -> Self {
        let local_path = match kind {
            DatasetKind::Crop => "crop_data_long.csv",
            DatasetKind::Rainfall => "rainfall_data.csv",
        };
        Self {
            resource_id: None,
            cache_name: kind.as_str().to_string(),
            local_path: PathBuf::from(local_path),
        }
    }

    /// Set the remote resource id.
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Set the bundled local fallback path.
    pub fn with_local_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = path.into();
        self
    }
}

/// Configuration for dataset acquisition.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Base URL of the open-data API.
    pub api_base: String,
    /// API key (None = remote tier disabled).
    pub api_key: Option<String>,
    /// Remote payload format.
    pub format: FetchFormat,
    /// Maximum records requested in the single fetch.
    pub limit: usize,
    /// Timeout for the single remote attempt.
    pub timeout: Duration,
    /// Directory holding cached payloads.
    pub cache_dir: PathBuf,
    /// Consult the cache before the remote endpoint.
    pub prefer_cache: bool,
    pub crop: DatasetConfig,
    pub rainfall: DatasetConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            format: FetchFormat::Csv,
            limit: 10_000,
            timeout: Duration::from_secs(30),
            cache_dir: PathBuf::from("cache"),
            prefer_cache: false,
            crop: DatasetConfig::for_kind(DatasetKind::Crop),
            rainfall: DatasetConfig::for_kind(DatasetKind::Rainfall),
        }
    }
}

impl SourceConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build configuration from environment variables on top of defaults.
    ///
    /// Reads `DATA_GOV_API_KEY`, `CROP_RESOURCE_ID`, `RAINFALL_RESOURCE_ID`,
    /// `AGRIQUERY_API_BASE`, `AGRIQUERY_CACHE_DIR`, `AGRIQUERY_CROP_CSV`,
    /// `AGRIQUERY_RAINFALL_CSV` and `AGRIQUERY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.api_key = env_var("DATA_GOV_API_KEY");
        config.crop.resource_id = env_var("CROP_RESOURCE_ID");
        config.rainfall.resource_id = env_var("RAINFALL_RESOURCE_ID");

        if let Some(base) = env_var("AGRIQUERY_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(dir) = env_var("AGRIQUERY_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }
        if let Some(path) = env_var("AGRIQUERY_CROP_CSV") {
            config.crop.local_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("AGRIQUERY_RAINFALL_CSV") {
            config.rainfall.local_path = PathBuf::from(path);
        }
        if let Some(secs) = env_var("AGRIQUERY_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                AgriError::Config(format!("AGRIQUERY_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the cache directory.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Set the remote payload format.
    pub fn with_format(mut self, format: FetchFormat) -> Self {
        self.format = format;
        self
    }

    /// Consult the cache before the remote endpoint.
    pub fn with_prefer_cache(mut self, prefer: bool) -> Self {
        self.prefer_cache = prefer;
        self
    }

    /// Replace the configuration of one dataset.
    pub fn with_dataset(mut self, kind: DatasetKind, dataset: DatasetConfig) -> Self {
        *self.dataset_mut(kind) = dataset;
        self
    }

    /// Configuration of one dataset.
    pub fn dataset(&self, kind: DatasetKind) -> &DatasetConfig {
        match kind {
            DatasetKind::Crop => &self.crop,
            DatasetKind::Rainfall => &self.rainfall,
        }
    }

    fn dataset_mut(&mut self, kind: DatasetKind) -> &mut DatasetConfig {
        match kind {
            DatasetKind::Crop => &mut self.crop,
            DatasetKind::Rainfall => &mut self.rainfall,
        }
    }

    /// Cache file for a dataset in the configured format.
    pub fn cache_path(&self, kind: DatasetKind) -> PathBuf {
        let dataset = self.dataset(kind);
        self.cache_dir
            .join(format!("{}.{}", dataset.cache_name, self.format.as_str()))
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
