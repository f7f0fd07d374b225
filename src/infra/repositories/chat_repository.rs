//! Chat repository: contact counting only.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use super::entities::chat;
use crate::errors::AppResult;

/// Chat repository trait for dependency injection.
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Total number of contact records
    async fn count_all(&self) -> AppResult<u64>;

    /// Number of contact records pointing at any of the given
    /// advertisement codes
    async fn count_for_advertisements(&self, codes: &[i64]) -> AppResult<u64>;
}

/// Concrete implementation of ChatRepository
pub struct ChatStore {
    db: DatabaseConnection,
}

impl ChatStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ChatRepository for ChatStore {
    async fn count_all(&self) -> AppResult<u64> {
        Ok(chat::Entity::find().count(&self.db).await?)
    }

    async fn count_for_advertisements(&self, codes: &[i64]) -> AppResult<u64> {
        if codes.is_empty() {
            return Ok(0);
        }

        let count = chat::Entity::find()
            .filter(chat::Column::AdvertisementCode.is_in(codes.iter().copied()))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
