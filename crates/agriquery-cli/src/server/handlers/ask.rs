//! Free-text question handler.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use agriquery::QueryResult;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for a free-text question.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question to answer.
    #[serde(default)]
    pub question: Option<String>,
}

/// POST /api/ask - Answer a free-text question.
pub async fn ask(
    State(state): State<AppState>,
    body: Option<Json<AskRequest>>,
) -> Result<Json<QueryResult>, ApiError> {
    let question = body
        .and_then(|Json(req)| req.question)
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No question provided".to_string()))?;

    info!(question = %question, "question received");
    let result = state.with_engine(move |engine| engine.ask(&question)).await?;
    Ok(Json(result))
}
