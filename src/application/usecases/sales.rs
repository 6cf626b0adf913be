use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    access_policy::{AccessPolicy, Operation, Resource, authorize},
    errors::SalesError,
    repositories::sales::SaleRepository,
    value_objects::{
        sales::{EditSaleModel, InsertSaleModel, ListSalesFilter, SaleModel},
        timestamps::{Clock, creation_stamp, refresh_updated_at},
    },
};

pub struct SaleUseCase<R, P, C>
where
    R: SaleRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    sale_repository: Arc<R>,
    access_policy: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> SaleUseCase<R, P, C>
where
    R: SaleRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub fn new(sale_repository: Arc<R>, access_policy: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            sale_repository,
            access_policy,
            clock,
        }
    }

    fn authorize(&self, operation: Operation) -> Result<()> {
        authorize(self.access_policy.as_ref(), Resource::Sales, operation).map_err(|err| {
            warn!(%operation, "sales: operation denied by access policy");
            err.into()
        })
    }

    pub async fn create(&self, insert_sale_model: InsertSaleModel) -> Result<SaleModel> {
        self.authorize(Operation::Insert)?;

        let now = creation_stamp(self.clock.as_ref());
        let insert_sale_entity = insert_sale_model.to_entity(now).map_err(|err| {
            warn!(error = %err, "sales: rejected new sale");
            err
        })?;
        let sale_id = insert_sale_entity.id;

        let entity = self
            .sale_repository
            .insert(insert_sale_entity)
            .await
            .map_err(|err| {
                error!(%sale_id, db_error = ?err, "sales: failed to insert sale");
                err
            })?;

        info!(%sale_id, plan = %entity.plan, "sales: sale created");
        SaleModel::from_entity(entity, self.clock.offset())
    }

    pub async fn get(&self, sale_id: Uuid) -> Result<SaleModel> {
        self.authorize(Operation::Select)?;

        let entity = self
            .sale_repository
            .find_by_id(sale_id)
            .await?
            .ok_or(SalesError::NotFound {
                resource: Resource::Sales,
                id: sale_id,
            })?;

        SaleModel::from_entity(entity, self.clock.offset())
    }

    pub async fn update(&self, sale_id: Uuid, edit_sale_model: EditSaleModel) -> Result<SaleModel> {
        self.authorize(Operation::Update)?;

        let not_found = SalesError::NotFound {
            resource: Resource::Sales,
            id: sale_id,
        };

        let Some(current) = self.sale_repository.find_by_id(sale_id).await? else {
            warn!(%sale_id, "sales: update on missing sale");
            return Err(not_found.into());
        };

        let fields = edit_sale_model.merge(&current).map_err(|err| {
            warn!(%sale_id, error = %err, "sales: rejected sale update");
            err
        })?;
        let updated_at = refresh_updated_at(self.clock.as_ref(), current.updated_at);

        let Some(entity) = self
            .sale_repository
            .update(sale_id, fields.into_changeset(updated_at))
            .await
            .map_err(|err| {
                error!(%sale_id, db_error = ?err, "sales: failed to update sale");
                err
            })?
        else {
            warn!(%sale_id, "sales: sale disappeared before update");
            return Err(not_found.into());
        };

        info!(%sale_id, "sales: sale updated");
        SaleModel::from_entity(entity, self.clock.offset())
    }

    pub async fn delete(&self, sale_id: Uuid) -> Result<()> {
        self.authorize(Operation::Delete)?;

        let deleted = self.sale_repository.delete(sale_id).await.map_err(|err| {
            error!(%sale_id, db_error = ?err, "sales: failed to delete sale");
            err
        })?;

        if !deleted {
            warn!(%sale_id, "sales: delete on missing sale");
            return Err(SalesError::NotFound {
                resource: Resource::Sales,
                id: sale_id,
            }
            .into());
        }

        info!(%sale_id, "sales: sale deleted");
        Ok(())
    }

    pub async fn list(&self, filter: &ListSalesFilter) -> Result<Vec<SaleModel>> {
        self.authorize(Operation::Select)?;

        let offset = self.clock.offset();
        self.sale_repository
            .list(filter)
            .await?
            .into_iter()
            .map(|entity| SaleModel::from_entity(entity, offset))
            .collect()
    }
}
