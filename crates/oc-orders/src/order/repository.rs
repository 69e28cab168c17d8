//! Order Repository
//!
//! Read and delete access to the orders collection. Writes that change
//! order state go through the unit of work instead, so their events are
//! gated on the transaction outcome.

use futures::TryStreamExt;
use mongodb::{bson::doc, Collection, Database};

use crate::order::entity::Order;
use crate::shared::error::Result;

pub struct OrderRepository {
    collection: Collection<Order>,
}

impl OrderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("orders"),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Order>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Order>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
