//! AgriQuery: natural-language questions over crop production and rainfall data.
//!
//! Questions are routed to a small set of analytic queries over two tabular
//! datasets. Each dataset is fetched from a remote open-data endpoint, with
//! the last successful fetch cached on disk and a bundled local file as the
//! final fallback.
//!
//! # Core Principles
//!
//! - **Always answer**: every question yields `{answer, sources}`; failures
//!   become error answers, never panics
//! - **Full provenance**: every answer names the tiers that supplied its data
//! - **Forgiving names**: states and crops are matched exactly, then fuzzily
//!
//! # Example
//!
//! ```no_run
//! use agriquery::{Engine, SourceConfig};
//!
//! let engine = Engine::new(SourceConfig::from_env().unwrap()).unwrap();
//! let result = engine.ask("Compare average rainfall between Kerala and Tamil Nadu");
//!
//! println!("{}", serde_json::to_string(&result).unwrap());
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod matching;
pub mod query;
pub mod router;
pub mod schema;
pub mod source;

mod engine;

pub use crate::engine::Engine;
pub use config::{DatasetConfig, FetchFormat, SourceConfig};
pub use context::DataContext;
pub use error::{AgriError, Result};
pub use matching::{MatchKind, NameMatcher, ResolvedName};
pub use query::{Answer, Intent, QueryRequest, QueryResult, YearFilter};
pub use schema::{Column, CropTable, DatasetKind, RainfallTable};
pub use source::{DataGovProvider, DataProvider, MockProvider, Provenance};
