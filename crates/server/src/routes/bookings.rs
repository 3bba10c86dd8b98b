use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use service::token::AuthClaims;
use store::json::document_to_json;

use crate::errors::ApiError;
use crate::routes::parse_object_id;
use crate::state::AppState;

/// Wire shape of an insert acknowledgement, in the camelCase form document
/// store drivers hand to browser clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutput {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutput {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutput {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>,
    pub upserted_count: u64,
}

#[derive(Deserialize)]
pub struct ListBookingsQuery {
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

pub async fn create_booking(
    State(state): State<AppState>,
    Json(booking): Json<Value>,
) -> Result<Json<InsertOutput>, ApiError> {
    let id = state.bookings.create(booking).await?;
    Ok(Json(InsertOutput {
        acknowledged: true,
        inserted_id: id.to_hex(),
    }))
}

/// Bookings for the caller's own email, or every booking when the token
/// carries no email and none is requested. The ownership check lives in the
/// booking service.
pub async fn list_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Value>, ApiError> {
    let bookings = state
        .bookings
        .list_for(query.email.as_deref(), claims.email.as_deref())
        .await?;
    Ok(Json(Value::Array(
        bookings.iter().map(document_to_json).collect(),
    )))
}

pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteOutput>, ApiError> {
    let id = parse_object_id(&id)?;
    let deleted = state.bookings.delete(id).await?;
    Ok(Json(DeleteOutput {
        acknowledged: true,
        deleted_count: deleted,
    }))
}

pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateStatusInput>,
) -> Result<Json<UpdateOutput>, ApiError> {
    let id = parse_object_id(&id)?;
    let update = state.bookings.set_status(id, &input.status).await?;
    Ok(Json(UpdateOutput {
        acknowledged: true,
        matched_count: update.matched_count,
        modified_count: update.modified_count,
        upserted_id: None,
        upserted_count: 0,
    }))
}
