//! Main Engine struct and public API.

use std::sync::Arc;

use crate::config::SourceConfig;
use crate::context::DataContext;
use crate::error::Result;
use crate::matching::NameMatcher;
use crate::query::{self, QueryRequest, QueryResult};
use crate::router::{self, Route};
use crate::source::{DataGovProvider, DataProvider, SourceResolver};

/// Answers questions and structured requests over the crop and rainfall
/// datasets.
pub struct Engine {
    context: DataContext,
    matcher: NameMatcher,
}

impl Engine {
    /// Create an engine that fetches from the open-data endpoint.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let provider = DataGovProvider::new(&config)?;
        Ok(Self::with_provider(config, provider))
    }

    /// Create an engine with a custom remote provider.
    pub fn with_provider(config: SourceConfig, provider: impl DataProvider + 'static) -> Self {
        let resolver = SourceResolver::new(config, Arc::new(provider));
        Self::from_context(DataContext::new(resolver))
    }

    /// Create an engine over an existing data context.
    pub fn from_context(context: DataContext) -> Self {
        Self {
            context,
            matcher: NameMatcher::default(),
        }
    }

    /// Use a custom name matcher.
    pub fn with_matcher(mut self, matcher: NameMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Route a free-text question and run the resulting query.
    pub fn ask(&self, question: &str) -> QueryResult {
        match router::route(question) {
            Route::Dispatch(request) => self.execute(&request),
            Route::Unmapped(unmapped) => QueryResult::unmapped(unmapped),
        }
    }

    /// Run a structured request, bypassing the router.
    pub fn execute(&self, request: &QueryRequest) -> QueryResult {
        query::execute(&self.context, &self.matcher, request)
    }

    /// Loaded datasets.
    pub fn context(&self) -> &DataContext {
        &self.context
    }
}
