//! Per-process dataset context.

use once_cell::unsync::OnceCell;

use crate::error::{AgriError, Result};
use crate::schema::{CropTable, NormalizedTable, RainfallTable};
use crate::source::{Loaded, Provenance, SourceResolver};

/// Owns at most one loaded table per dataset.
///
/// Tables are loaded on first access and kept for the lifetime of the
/// context; there is no invalidation. A failed load is not memoized, so a
/// later query retries the tiers.
pub struct DataContext {
    resolver: Option<SourceResolver>,
    crop: OnceCell<Loaded<CropTable>>,
    rainfall: OnceCell<Loaded<RainfallTable>>,
}

impl DataContext {
    /// Create a context that loads through `resolver`.
    pub fn new(resolver: SourceResolver) -> Self {
        Self {
            resolver: Some(resolver),
            crop: OnceCell::new(),
            rainfall: OnceCell::new(),
        }
    }

    /// Create a context over tables that are already in memory.
    pub fn from_tables(crop: CropTable, rainfall: RainfallTable, provenance: Provenance) -> Self {
        Self {
            resolver: None,
            crop: OnceCell::with_value(Loaded {
                table: crop,
                provenance: provenance.clone(),
            }),
            rainfall: OnceCell::with_value(Loaded {
                table: rainfall,
                provenance,
            }),
        }
    }

    /// The crop table, loading it on first use.
    pub fn crop(&self) -> Result<&Loaded<CropTable>> {
        self.crop.get_or_try_init(|| self.load())
    }

    /// The rainfall table, loading it on first use.
    pub fn rainfall(&self) -> Result<&Loaded<RainfallTable>> {
        self.rainfall.get_or_try_init(|| self.load())
    }

    fn load<T: NormalizedTable>(&self) -> Result<Loaded<T>> {
        match &self.resolver {
            Some(resolver) => resolver.load_table(),
            None => Err(AgriError::DataUnavailable {
                dataset: T::KIND,
                reason: "context has no data source".to_string(),
            }),
        }
    }
}
