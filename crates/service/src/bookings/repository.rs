use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::errors::ServiceError;

/// Outcome of a status update, mirroring the store's update summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Repository abstraction for booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: Document) -> Result<ObjectId, ServiceError>;
    /// Bookings for one customer email; `None` returns every booking.
    async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError>;
    /// Returns the number of deleted documents (zero when the id matched
    /// nothing).
    async fn delete(&self, id: ObjectId) -> Result<u64, ServiceError>;
    async fn set_status(&self, id: ObjectId, status: &str) -> Result<StatusUpdate, ServiceError>;
}

/// Simple in-memory mock repository for router tests.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBookingRepository {
        bookings: Mutex<Vec<Document>>,
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn insert(&self, mut booking: Document) -> Result<ObjectId, ServiceError> {
            let id = ObjectId::new();
            booking.insert("_id", id);
            self.bookings.lock().unwrap().push(booking);
            Ok(id)
        }

        async fn find_by_email(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
            let bookings = self.bookings.lock().unwrap();
            Ok(bookings
                .iter()
                .filter(|doc| match email {
                    Some(email) => doc.get_str("email").ok() == Some(email),
                    None => true,
                })
                .cloned()
                .collect())
        }

        async fn delete(&self, id: ObjectId) -> Result<u64, ServiceError> {
            let mut bookings = self.bookings.lock().unwrap();
            let before = bookings.len();
            bookings.retain(|doc| doc.get_object_id("_id").ok() != Some(id));
            Ok((before - bookings.len()) as u64)
        }

        async fn set_status(&self, id: ObjectId, status: &str) -> Result<StatusUpdate, ServiceError> {
            let mut bookings = self.bookings.lock().unwrap();
            let Some(found) = bookings
                .iter_mut()
                .find(|doc| doc.get_object_id("_id").ok() == Some(id))
            else {
                return Ok(StatusUpdate { matched_count: 0, modified_count: 0 });
            };
            // the store reports modified_count 0 when the value is unchanged
            let modified = u64::from(found.get_str("status").ok() != Some(status));
            found.insert("status", status);
            Ok(StatusUpdate { matched_count: 1, modified_count: modified })
        }
    }
}
