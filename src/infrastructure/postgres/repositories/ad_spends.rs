use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::ad_spends::{AdSpendEntity, InsertAdSpendEntity, UpdateAdSpendEntity},
        repositories::ad_spends::AdSpendRepository,
        value_objects::{ad_spends::ListAdSpendsFilter, enums::sort_order::SortOrder},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::ad_spends},
};

pub struct AdSpendPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AdSpendPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AdSpendRepository for AdSpendPostgres {
    async fn insert(&self, insert_ad_spend_entity: InsertAdSpendEntity) -> Result<AdSpendEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(ad_spends::table)
            .values(&insert_ad_spend_entity)
            .returning(AdSpendEntity::as_returning())
            .get_result::<AdSpendEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, ad_spend_id: Uuid) -> Result<Option<AdSpendEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = ad_spends::table
            .filter(ad_spends::id.eq(ad_spend_id))
            .select(AdSpendEntity::as_select())
            .first::<AdSpendEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update(
        &self,
        ad_spend_id: Uuid,
        update_ad_spend_entity: UpdateAdSpendEntity,
    ) -> Result<Option<AdSpendEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(ad_spends::table)
            .filter(ad_spends::id.eq(ad_spend_id))
            .set(&update_ad_spend_entity)
            .returning(AdSpendEntity::as_returning())
            .get_result::<AdSpendEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, ad_spend_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(ad_spends::table)
            .filter(ad_spends::id.eq(ad_spend_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn list(&self, filter: &ListAdSpendsFilter) -> Result<Vec<AdSpendEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = ad_spends::table
            .select(AdSpendEntity::as_select())
            .into_boxed();

        if let Some(created_from) = filter.created_from {
            query = query.filter(ad_spends::created_at.ge(created_from));
        }

        if let Some(created_to) = filter.created_to {
            query = query.filter(ad_spends::created_at.lt(created_to));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query.order((ad_spends::created_at.asc(), ad_spends::id.asc())),
            SortOrder::Desc => query.order((ad_spends::created_at.desc(), ad_spends::id.desc())),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let results = query.load::<AdSpendEntity>(&mut conn)?;

        Ok(results)
    }
}
