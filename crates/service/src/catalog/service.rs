use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::Document;
use tracing::instrument;

use super::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Read-side operations over the service catalog.
#[derive(Clone)]
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Document>, ServiceError> {
        self.repo.all().await
    }

    /// Fetch one catalog entry narrowed to the booking page fields. A
    /// missing id is not an error; callers render the absence.
    #[instrument(skip(self), fields(service = %id))]
    pub async fn get(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        self.repo.find_projected(id).await
    }
}
