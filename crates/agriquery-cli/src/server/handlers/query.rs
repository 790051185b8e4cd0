//! Structured-query handler.

use axum::{extract::State, Json};
use tracing::info;

use agriquery::{QueryRequest, QueryResult};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// POST /api/query - Run a structured query.
pub async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResult>, ApiError> {
    info!(intent = %request.intent, "structured query received");
    let result = state
        .with_engine(move |engine| engine.execute(&request))
        .await?;
    Ok(Json(result))
}
