use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::ad_spends::{AdSpendEntity, InsertAdSpendEntity, UpdateAdSpendEntity},
    repositories::ad_spends::AdSpendRepository,
    value_objects::{ad_spends::ListAdSpendsFilter, enums::sort_order::SortOrder},
};

#[derive(Debug, Clone, Default)]
pub struct AdSpendMemory {
    rows: Arc<RwLock<Vec<AdSpendEntity>>>,
}

impl AdSpendMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl AdSpendRepository for AdSpendMemory {
    async fn insert(&self, insert_ad_spend_entity: InsertAdSpendEntity) -> Result<AdSpendEntity> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.id == insert_ad_spend_entity.id) {
            anyhow::bail!("duplicate ad spend id {}", insert_ad_spend_entity.id);
        }

        let row = AdSpendEntity {
            id: insert_ad_spend_entity.id,
            description: insert_ad_spend_entity.description,
            amount: insert_ad_spend_entity.amount,
            created_at: insert_ad_spend_entity.created_at,
            updated_at: insert_ad_spend_entity.updated_at,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn find_by_id(&self, ad_spend_id: Uuid) -> Result<Option<AdSpendEntity>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == ad_spend_id).cloned())
    }

    async fn update(
        &self,
        ad_spend_id: Uuid,
        update_ad_spend_entity: UpdateAdSpendEntity,
    ) -> Result<Option<AdSpendEntity>> {
        let mut rows = self.rows.write().await;

        let Some(row) = rows.iter_mut().find(|row| row.id == ad_spend_id) else {
            return Ok(None);
        };

        row.description = update_ad_spend_entity.description;
        row.amount = update_ad_spend_entity.amount;
        row.updated_at = update_ad_spend_entity.updated_at;

        Ok(Some(row.clone()))
    }

    async fn delete(&self, ad_spend_id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != ad_spend_id);
        Ok(rows.len() < before)
    }

    async fn list(&self, filter: &ListAdSpendsFilter) -> Result<Vec<AdSpendEntity>> {
        let rows = self.rows.read().await;

        let mut results: Vec<AdSpendEntity> =
            rows.iter().filter(|row| filter.matches(row)).cloned().collect();

        results.sort_by_key(|row| (row.created_at, row.id));
        if filter.sort_order == SortOrder::Desc {
            results.reverse();
        }

        if let Some(limit) = filter.limit {
            results.truncate(usize::try_from(limit.max(0))?);
        }

        Ok(results)
    }
}
