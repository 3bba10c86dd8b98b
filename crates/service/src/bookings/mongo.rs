use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use super::repository::{BookingRepository, StatusUpdate};
use crate::errors::ServiceError;

/// Booking repository backed by the `bookings` collection.
#[derive(Clone)]
pub struct MongoBookingRepository {
    bookings: Collection<Document>,
}

impl MongoBookingRepository {
    pub fn new(bookings: Collection<Document>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn insert(&self, booking: Document) -> Result<ObjectId, ServiceError> {
        let result = self
            .bookings
            .insert_one(booking)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ServiceError::Db("insert returned a non-ObjectId id".into()))
    }

    async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => doc! {},
        };
        let cursor = self
            .bookings
            .find(filter)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, ServiceError> {
        let result = self
            .bookings
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(result.deleted_count)
    }

    async fn set_status(&self, id: ObjectId, status: &str) -> Result<StatusUpdate, ServiceError> {
        let result = self
            .bookings
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status } })
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(StatusUpdate {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }
}
