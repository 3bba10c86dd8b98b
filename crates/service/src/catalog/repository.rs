use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;

use crate::errors::ServiceError;

/// Fields a single catalog lookup is narrowed to. `_id` rides along the way
/// the store includes it in any projection.
pub const BOOKING_PAGE_FIELDS: [&str; 5] = ["_id", "title", "price", "service_id", "img"];

/// Repository abstraction for the read-only service catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn all(&self) -> Result<Vec<Document>, ServiceError>;
    /// One catalog entry by id, narrowed to the booking page fields.
    async fn find_projected(&self, id: ObjectId) -> Result<Option<Document>, ServiceError>;
}

/// Simple in-memory mock repository for router tests.
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCatalogRepository {
        services: Mutex<Vec<Document>>,
    }

    impl MockCatalogRepository {
        /// Insert a catalog document, assigning an `_id` when missing, and
        /// return the id for follow-up lookups.
        pub fn seed(&self, mut doc: Document) -> ObjectId {
            let id = doc.get_object_id("_id").unwrap_or_else(|_| ObjectId::new());
            doc.insert("_id", id);
            self.services.lock().unwrap().push(doc);
            id
        }
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn all(&self) -> Result<Vec<Document>, ServiceError> {
            Ok(self.services.lock().unwrap().clone())
        }

        async fn find_projected(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
            let services = self.services.lock().unwrap();
            let found = services
                .iter()
                .find(|doc| doc.get_object_id("_id").ok() == Some(id));
            Ok(found.map(|doc| {
                let mut projected = Document::new();
                for key in BOOKING_PAGE_FIELDS {
                    if let Some(value) = doc.get(key) {
                        projected.insert(key, value.clone());
                    }
                }
                projected
            }))
        }
    }
}
