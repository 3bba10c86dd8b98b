use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::Collection;

use super::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Catalog repository backed by the `services` collection.
#[derive(Clone)]
pub struct MongoCatalogRepository {
    services: Collection<Document>,
}

impl MongoCatalogRepository {
    pub fn new(services: Collection<Document>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    async fn all(&self) -> Result<Vec<Document>, ServiceError> {
        let cursor = self
            .services
            .find(doc! {})
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_projected(&self, id: ObjectId) -> Result<Option<Document>, ServiceError> {
        self.services
            .find_one(doc! { "_id": id })
            .projection(doc! { "title": 1, "price": 1, "service_id": 1, "img": 1 })
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }
}
