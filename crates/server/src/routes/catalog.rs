use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;

use store::json::document_to_json;

use crate::errors::ApiError;
use crate::routes::parse_object_id;
use crate::state::AppState;

pub async fn list_services(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let services = state.catalog.list().await?;
    Ok(Json(Value::Array(
        services.iter().map(document_to_json).collect(),
    )))
}

/// Single catalog entry narrowed to the booking page fields. An unknown id
/// renders as JSON null, matching the find-one contract.
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_object_id(&id)?;
    let found = state.catalog.get(id).await?;
    Ok(Json(
        found.as_ref().map(document_to_json).unwrap_or(Value::Null),
    ))
}
