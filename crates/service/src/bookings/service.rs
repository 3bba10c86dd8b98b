use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use serde_json::Value;
use tracing::{info, instrument};

use super::repository::{BookingRepository, StatusUpdate};
use crate::errors::ServiceError;

/// Booking workflows: creation, per-customer listing, cancellation and
/// status changes.
#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    /// Store a booking exactly as the client sent it. The body must be a
    /// JSON object; fields are not otherwise validated.
    #[instrument(skip(self, booking))]
    pub async fn create(&self, booking: Value) -> Result<ObjectId, ServiceError> {
        let doc = value_to_document(booking)?;
        let id = self.repo.insert(doc).await?;
        info!(booking_id = %id, "booking created");
        Ok(id)
    }

    /// List bookings matching the requested email filter. A caller may only
    /// read under their own identity: the filter must equal the
    /// authenticated email exactly, absent matching absent. Only when both
    /// are absent does the listing cover every booking; an empty email is a
    /// literal filter value, not an absent one.
    pub async fn list_for(
        &self,
        requested: Option<&str>,
        authenticated: Option<&str>,
    ) -> Result<Vec<Document>, ServiceError> {
        if requested != authenticated {
            return Err(ServiceError::Forbidden);
        }
        self.repo.find_by_email(requested).await
    }

    /// Remove one booking; a count of zero means the id matched nothing.
    #[instrument(skip(self), fields(booking = %id))]
    pub async fn delete(&self, id: ObjectId) -> Result<u64, ServiceError> {
        self.repo.delete(id).await
    }

    /// Overwrite only the `status` field of one booking.
    #[instrument(skip(self), fields(booking = %id, status = %status))]
    pub async fn set_status(
        &self,
        id: ObjectId,
        status: &str,
    ) -> Result<StatusUpdate, ServiceError> {
        self.repo.set_status(id, status).await
    }
}

fn value_to_document(value: Value) -> Result<Document, ServiceError> {
    match &value {
        Value::Object(_) => mongodb::bson::to_document(&value)
            .map_err(|e| ServiceError::Validation(e.to_string())),
        _ => Err(ServiceError::Validation("booking must be a JSON object".into())),
    }
}
