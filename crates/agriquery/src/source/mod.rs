//! Dataset acquisition with fallback.
//!
//! A dataset is obtained from the first tier that succeeds:
//!
//! 1. **Remote** - a single GET against the open-data endpoint via a
//!    [`DataProvider`]; a successful fetch is written through to the cache.
//! 2. **Cache** - the last payload fetched for the dataset. Unreadable cache
//!    files are deleted.
//! 3. **Local** - a file shipped with the deployment.
//!
//! Every load reports its [`Provenance`].

mod datagov;
mod mock;
mod provenance;
mod provider;
mod resolver;

pub use datagov::DataGovProvider;
pub use mock::{MockProvider, MockResponse};
pub use provenance::{Provenance, API_SOURCE};
pub use provider::{DataProvider, ResourceRequest};
pub use resolver::{Loaded, SourceResolver};
