//! Tiered dataset resolution: remote → cache → local file.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::provenance::{Provenance, API_SOURCE};
use super::provider::{DataProvider, ResourceRequest};
use crate::config::{FetchFormat, SourceConfig};
use crate::error::{AgriError, Result};
use crate::input::{parse_records, Parser};
use crate::schema::{DatasetKind, NormalizedTable};

/// A normalized table together with the tier that supplied it.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub table: T,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Remote,
    Cache,
    Local,
}

/// Obtains normalized datasets from the first tier that succeeds.
pub struct SourceResolver {
    config: SourceConfig,
    provider: Arc<dyn DataProvider>,
    parser: Parser,
}

impl SourceResolver {
    /// Create a resolver.
    pub fn new(config: SourceConfig, provider: Arc<dyn DataProvider>) -> Self {
        Self {
            config,
            provider,
            parser: Parser::new(),
        }
    }

    /// Source configuration in use.
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Load and normalize a dataset from the first tier that yields a
    /// usable table.
    ///
    /// A tier succeeds only once its payload both parses and normalizes, so
    /// a well-formed but schema-less payload falls through to the next tier.
    pub fn load_table<T: NormalizedTable>(&self) -> Result<Loaded<T>> {
        let kind = T::KIND;
        let tiers = if self.config.prefer_cache {
            [Tier::Cache, Tier::Remote, Tier::Local]
        } else {
            [Tier::Remote, Tier::Cache, Tier::Local]
        };

        let mut failures = Vec::new();
        for tier in tiers {
            let attempt = match tier {
                Tier::Remote => self.try_remote::<T>(),
                Tier::Cache => self.try_cache::<T>(),
                Tier::Local => self.try_local::<T>(),
            };
            match attempt {
                Ok(loaded) => {
                    info!(
                        dataset = %kind,
                        rows = loaded.table.row_count(),
                        source = ?loaded.provenance.as_slice(),
                        "dataset loaded"
                    );
                    return Ok(loaded);
                }
                Err(e) => {
                    warn!(dataset = %kind, tier = ?tier, error = %e, "data tier failed");
                    failures.push(format!("{:?}: {}", tier, e));
                }
            }
        }

        Err(AgriError::DataUnavailable {
            dataset: kind,
            reason: failures.join("; "),
        })
    }

    /// Single remote attempt; the payload is cached only after it normalizes.
    fn try_remote<T: NormalizedTable>(&self) -> Result<Loaded<T>> {
        let kind = T::KIND;
        let resource_id = self
            .config
            .dataset(kind)
            .resource_id
            .clone()
            .ok_or_else(|| AgriError::Config(format!("no resource id configured for {}", kind)))?;

        let request = ResourceRequest {
            dataset: kind,
            resource_id,
            format: self.config.format,
            limit: self.config.limit,
            offset: 0,
        };
        debug!(dataset = %kind, provider = self.provider.name(), "fetching remote resource");

        let payload = self.provider.fetch(&request)?;
        let table = self.normalize_payload::<T>(&payload, self.config.format)?;
        self.write_cache(kind, &payload);

        Ok(Loaded {
            table,
            provenance: Provenance::single(API_SOURCE),
        })
    }

    /// Read the cached payload; a cache file that cannot be parsed or
    /// normalized is deleted.
    fn try_cache<T: NormalizedTable>(&self) -> Result<Loaded<T>> {
        let path = self.config.cache_path(T::KIND);
        if !path.exists() {
            return Err(AgriError::EmptyData(format!("no cache file at {}", path.display())));
        }

        let bytes = std::fs::read(&path).map_err(|e| AgriError::io(&path, e))?;
        match self.normalize_payload::<T>(&bytes, FetchFormat::from_path(&path)) {
            Ok(table) => Ok(Loaded {
                table,
                provenance: Provenance::single(path.display().to_string()),
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cached file corrupted, removing");
                if let Err(remove_err) = std::fs::remove_file(&path) {
                    warn!(path = %path.display(), error = %remove_err, "failed to remove cache file");
                }
                Err(e)
            }
        }
    }

    fn try_local<T: NormalizedTable>(&self) -> Result<Loaded<T>> {
        let path = &self.config.dataset(T::KIND).local_path;
        let bytes = std::fs::read(path).map_err(|e| AgriError::io(path, e))?;
        let table = self.normalize_payload::<T>(&bytes, FetchFormat::from_path(path))?;
        Ok(Loaded {
            table,
            provenance: Provenance::single(path.display().to_string()),
        })
    }

    fn normalize_payload<T: NormalizedTable>(&self, bytes: &[u8], format: FetchFormat) -> Result<T> {
        let raw = match format {
            FetchFormat::Csv => self.parser.parse_bytes(bytes)?,
            FetchFormat::Json => parse_records(bytes)?,
        };
        T::from_raw(&raw)
    }

    /// Overwrite the cache via a temporary file and rename.
    fn write_cache(&self, kind: DatasetKind, payload: &[u8]) {
        let path = self.config.cache_path(kind);
        if let Err(e) = write_atomically(&path, payload) {
            warn!(path = %path.display(), error = %e, "failed to write cache");
        } else {
            debug!(path = %path.display(), bytes = payload.len(), "cache updated");
        }
    }
}

fn write_atomically(path: &Path, payload: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| AgriError::io(dir, e))?;
    }
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, payload).map_err(|e| AgriError::io(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| AgriError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetConfig;
    use crate::schema::RainfallTable;
    use crate::source::MockProvider;
    use tempfile::TempDir;

    const RAIN_CSV: &str = "State,Year,Rainfall\nKerala,2020,3000\n";

    fn config(dir: &TempDir) -> SourceConfig {
        SourceConfig::new()
            .with_cache_dir(dir.path().join("cache"))
            .with_dataset(
                DatasetKind::Rainfall,
                DatasetConfig::for_kind(DatasetKind::Rainfall)
                    .with_resource_id("rain-id")
                    .with_local_path(dir.path().join("rainfall_data.csv")),
            )
    }

    #[test]
    fn test_remote_success_writes_cache() {
        let dir = TempDir::new().unwrap();
        let provider = Arc::new(MockProvider::new().with_payload(DatasetKind::Rainfall, RAIN_CSV));
        let resolver = SourceResolver::new(config(&dir), provider.clone());

        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();
        assert_eq!(loaded.table.row_count(), 1);
        assert_eq!(loaded.provenance.as_slice(), &["api".to_string()]);
        assert_eq!(provider.call_count(), 1);

        let cached = std::fs::read_to_string(dir.path().join("cache/rainfall.csv")).unwrap();
        assert_eq!(cached, RAIN_CSV);
    }

    #[test]
    fn test_falls_back_to_cache() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        std::fs::create_dir_all(&cfg.cache_dir).unwrap();
        std::fs::write(cfg.cache_path(DatasetKind::Rainfall), RAIN_CSV).unwrap();

        let resolver = SourceResolver::new(cfg.clone(), Arc::new(MockProvider::new()));
        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();

        assert_eq!(
            loaded.provenance.as_slice(),
            &[cfg.cache_path(DatasetKind::Rainfall).display().to_string()]
        );
        assert_eq!(loaded.table.records[0].state, "kerala");
    }

    #[test]
    fn test_corrupted_cache_is_deleted() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        std::fs::create_dir_all(&cfg.cache_dir).unwrap();
        let cache = cfg.cache_path(DatasetKind::Rainfall);
        std::fs::write(&cache, "").unwrap();
        std::fs::write(&cfg.rainfall.local_path, RAIN_CSV).unwrap();

        let resolver = SourceResolver::new(cfg.clone(), Arc::new(MockProvider::new()));
        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();

        assert!(!cache.exists());
        assert_eq!(
            loaded.provenance.as_slice(),
            &[cfg.rainfall.local_path.display().to_string()]
        );
    }

    #[test]
    fn test_all_tiers_fail() {
        let dir = TempDir::new().unwrap();
        let resolver = SourceResolver::new(config(&dir), Arc::new(MockProvider::new()));

        let err = resolver.load_table::<RainfallTable>().unwrap_err();
        assert!(matches!(
            err,
            AgriError::DataUnavailable {
                dataset: DatasetKind::Rainfall,
                ..
            }
        ));
    }

    #[test]
    fn test_prefer_cache_skips_remote() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir).with_prefer_cache(true);
        std::fs::create_dir_all(&cfg.cache_dir).unwrap();
        std::fs::write(cfg.cache_path(DatasetKind::Rainfall), RAIN_CSV).unwrap();

        let provider = Arc::new(MockProvider::new().with_payload(DatasetKind::Rainfall, RAIN_CSV));
        let resolver = SourceResolver::new(cfg, provider.clone());
        resolver.load_table::<RainfallTable>().unwrap();

        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_unparsable_remote_payload_falls_through() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir).with_format(FetchFormat::Json);
        std::fs::write(&cfg.rainfall.local_path, RAIN_CSV).unwrap();

        let provider =
            Arc::new(MockProvider::new().with_payload(DatasetKind::Rainfall, r#"{"records": []}"#));
        let resolver = SourceResolver::new(cfg.clone(), provider);
        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();

        assert!(!cfg.cache_path(DatasetKind::Rainfall).exists());
        assert_eq!(
            loaded.provenance.as_slice(),
            &[cfg.rainfall.local_path.display().to_string()]
        );
    }

    #[test]
    fn test_schemaless_remote_payload_keeps_cache() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let cache = cfg.cache_path(DatasetKind::Rainfall);
        std::fs::create_dir_all(&cfg.cache_dir).unwrap();
        std::fs::write(&cache, RAIN_CSV).unwrap();
        std::fs::write(&cfg.rainfall.local_path, RAIN_CSV).unwrap();

        let provider = Arc::new(
            MockProvider::new().with_payload(DatasetKind::Rainfall, "message\nInvalid request\n"),
        );
        let resolver = SourceResolver::new(cfg.clone(), provider);
        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();

        assert_eq!(loaded.table.records[0].state, "kerala");
        assert_eq!(
            loaded.provenance.as_slice(),
            &[cache.display().to_string()]
        );
        assert_eq!(std::fs::read_to_string(&cache).unwrap(), RAIN_CSV);
    }

    #[test]
    fn test_schemaless_cache_is_deleted() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        let cache = cfg.cache_path(DatasetKind::Rainfall);
        std::fs::create_dir_all(&cfg.cache_dir).unwrap();
        std::fs::write(&cache, "message\nInvalid request\n").unwrap();
        std::fs::write(&cfg.rainfall.local_path, RAIN_CSV).unwrap();

        let resolver = SourceResolver::new(cfg.clone(), Arc::new(MockProvider::new()));
        let loaded: Loaded<RainfallTable> = resolver.load_table().unwrap();

        assert!(!cache.exists());
        assert_eq!(
            loaded.provenance.as_slice(),
            &[cfg.rainfall.local_path.display().to_string()]
        );
    }
}
