use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        entities::sales::{InsertSaleEntity, SaleEntity, UpdateSaleEntity},
        repositories::sales::SaleRepository,
        value_objects::{enums::sort_order::SortOrder, sales::ListSalesFilter},
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::sales},
};

pub struct SalePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SalePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SaleRepository for SalePostgres {
    async fn insert(&self, insert_sale_entity: InsertSaleEntity) -> Result<SaleEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(sales::table)
            .values(&insert_sale_entity)
            .returning(SaleEntity::as_returning())
            .get_result::<SaleEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, sale_id: Uuid) -> Result<Option<SaleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = sales::table
            .filter(sales::id.eq(sale_id))
            .select(SaleEntity::as_select())
            .first::<SaleEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn update(
        &self,
        sale_id: Uuid,
        update_sale_entity: UpdateSaleEntity,
    ) -> Result<Option<SaleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = update(sales::table)
            .filter(sales::id.eq(sale_id))
            .set(&update_sale_entity)
            .returning(SaleEntity::as_returning())
            .get_result::<SaleEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn delete(&self, sale_id: Uuid) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let deleted = delete(sales::table)
            .filter(sales::id.eq(sale_id))
            .execute(&mut conn)?;

        Ok(deleted > 0)
    }

    async fn list(&self, filter: &ListSalesFilter) -> Result<Vec<SaleEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = sales::table.select(SaleEntity::as_select()).into_boxed();

        if let Some(plan) = filter.plan {
            query = query.filter(sales::plan.eq(plan.to_string()));
        }

        if let Some(kind) = filter.kind {
            query = query.filter(sales::kind.eq(kind.to_string()));
        }

        if let Some(created_from) = filter.created_from {
            query = query.filter(sales::created_at.ge(created_from));
        }

        if let Some(created_to) = filter.created_to {
            query = query.filter(sales::created_at.lt(created_to));
        }

        query = match filter.sort_order {
            SortOrder::Asc => query.order((sales::created_at.asc(), sales::id.asc())),
            SortOrder::Desc => query.order((sales::created_at.desc(), sales::id.desc())),
        };

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        let results = query.load::<SaleEntity>(&mut conn)?;

        Ok(results)
    }
}
