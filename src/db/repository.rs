use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection};
use serde::{de::DeserializeOwned, Serialize};

use crate::db::mongo::DB_NAME;
use crate::errors::ApiError;

/// Typed access to one collection. All transport-level failures map to
/// `ApiError::StorageUnavailable`; a miss on an id-addressed operation maps
/// to `ApiError::NotFound` so callers can treat a repeated delete as an
/// idempotent failure rather than a crash.
pub struct Repository<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
    kind: &'static str,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(client: &Client, collection_name: &str, kind: &'static str) -> Self {
        Self {
            collection: client.database(DB_NAME).collection(collection_name),
            kind,
        }
    }

    pub async fn list(&self, filter: Document, sort: Document) -> Result<Vec<T>, ApiError> {
        let cursor = self
            .collection
            .find(filter)
            .sort(sort)
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

        cursor
            .try_collect::<Vec<T>>()
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, ApiError> {
        self.collection
            .find_one(filter)
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> Result<T, ApiError> {
        match self.collection.find_one(doc! { "_id": *id }).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(ApiError::NotFound(self.kind)),
            Err(e) => Err(ApiError::StorageUnavailable(e.to_string())),
        }
    }

    pub async fn insert(&self, record: &T) -> Result<ObjectId, ApiError> {
        let result = self
            .collection
            .insert_one(record)
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::StorageUnavailable("no id returned on insert".to_string()))
    }

    pub async fn update_fields(&self, id: &ObjectId, fields: Document) -> Result<(), ApiError> {
        let result = self
            .collection
            .update_one(doc! { "_id": *id }, doc! { "$set": fields })
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(ApiError::NotFound(self.kind));
        }
        Ok(())
    }

    /// Conditional update: applies `update` only to documents matching
    /// `filter` and reports how many matched. The booking lifecycle uses
    /// this to make status transitions atomic against concurrent admins.
    pub async fn update_where(&self, filter: Document, update: Document) -> Result<u64, ApiError> {
        let result = self
            .collection
            .update_one(filter, update)
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

        Ok(result.matched_count)
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<(), ApiError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": *id })
            .await
            .map_err(|e| ApiError::StorageUnavailable(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(ApiError::NotFound(self.kind));
        }
        Ok(())
    }
}

pub fn services(client: &Client) -> Repository<crate::models::service::Service> {
    Repository::new(client, "Services", "Service")
}

pub fn packages(client: &Client) -> Repository<crate::models::package::Package> {
    Repository::new(client, "Packages", "Package")
}

pub fn bookings(client: &Client) -> Repository<crate::models::booking::Booking> {
    Repository::new(client, "Bookings", "Booking")
}

pub fn admins(client: &Client) -> Repository<crate::models::admin::Admin> {
    Repository::new(client, "Admins", "Admin")
}
