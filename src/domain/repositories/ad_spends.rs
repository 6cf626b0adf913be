use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::{
    entities::ad_spends::{AdSpendEntity, InsertAdSpendEntity, UpdateAdSpendEntity},
    value_objects::ad_spends::ListAdSpendsFilter,
};

#[async_trait]
#[automock]
pub trait AdSpendRepository {
    async fn insert(&self, insert_ad_spend_entity: InsertAdSpendEntity) -> Result<AdSpendEntity>;

    async fn find_by_id(&self, ad_spend_id: Uuid) -> Result<Option<AdSpendEntity>>;

    async fn update(
        &self,
        ad_spend_id: Uuid,
        update_ad_spend_entity: UpdateAdSpendEntity,
    ) -> Result<Option<AdSpendEntity>>;

    async fn delete(&self, ad_spend_id: Uuid) -> Result<bool>;

    async fn list(&self, filter: &ListAdSpendsFilter) -> Result<Vec<AdSpendEntity>>;
}
