use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::sales::{InsertSaleEntity, SaleEntity, UpdateSaleEntity},
    value_objects::sales::ListSalesFilter,
};

#[async_trait]
#[automock]
pub trait SaleRepository {
    async fn insert(&self, insert_sale_entity: InsertSaleEntity) -> Result<SaleEntity>;

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<SaleEntity>>;

    /// Returns `None` when no row has `sale_id`.
    async fn update(
        &self,
        sale_id: Uuid,
        update_sale_entity: UpdateSaleEntity,
    ) -> Result<Option<SaleEntity>>;

    /// Returns whether a row was removed.
    async fn delete(&self, sale_id: Uuid) -> Result<bool>;

    async fn list(&self, filter: &ListSalesFilter) -> Result<Vec<SaleEntity>>;
}
