//! Application state for the web server.

use std::sync::{Arc, Mutex};

use agriquery::Engine;

use super::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The engine answering questions. Requests are served one at a time.
    pub engine: Arc<Mutex<Engine>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Run `f` against the engine on the blocking thread pool.
    ///
    /// Dataset loading may perform a blocking HTTP request, so engine calls
    /// never run on the async executor.
    pub async fn with_engine<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Engine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = self.engine.clone();
        tokio::task::spawn_blocking(move || {
            let engine = engine
                .lock()
                .map_err(|_| ApiError::Internal("engine lock poisoned".to_string()))?;
            Ok(f(&engine))
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
    }
}
