use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    entities::sales::{InsertSaleEntity, SaleEntity, UpdateSaleEntity},
    repositories::sales::SaleRepository,
    value_objects::{enums::sort_order::SortOrder, sales::ListSalesFilter},
};

#[derive(Debug, Clone, Default)]
pub struct SaleMemory {
    rows: Arc<RwLock<Vec<SaleEntity>>>,
}

impl SaleMemory {
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
impl SaleRepository for SaleMemory {
    async fn insert(&self, insert_sale_entity: InsertSaleEntity) -> Result<SaleEntity> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|row| row.id == insert_sale_entity.id) {
            anyhow::bail!("duplicate sale id {}", insert_sale_entity.id);
        }

        let row = SaleEntity {
            id: insert_sale_entity.id,
            name: insert_sale_entity.name,
            plan: insert_sale_entity.plan,
            kind: insert_sale_entity.kind,
            amount: insert_sale_entity.amount,
            created_at: insert_sale_entity.created_at,
            updated_at: insert_sale_entity.updated_at,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<SaleEntity>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id == sale_id).cloned())
    }

    async fn update(
        &self,
        sale_id: Uuid,
        update_sale_entity: UpdateSaleEntity,
    ) -> Result<Option<SaleEntity>> {
        let mut rows = self.rows.write().await;

        let Some(row) = rows.iter_mut().find(|row| row.id == sale_id) else {
            return Ok(None);
        };

        row.name = update_sale_entity.name;
        row.plan = update_sale_entity.plan;
        row.kind = update_sale_entity.kind;
        row.amount = update_sale_entity.amount;
        row.updated_at = update_sale_entity.updated_at;

        Ok(Some(row.clone()))
    }

    async fn delete(&self, sale_id: Uuid) -> Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != sale_id);
        Ok(rows.len() < before)
    }

    async fn list(&self, filter: &ListSalesFilter) -> Result<Vec<SaleEntity>> {
        let rows = self.rows.read().await;

        let mut results: Vec<SaleEntity> =
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
