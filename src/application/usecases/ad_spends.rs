use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    access_policy::{AccessPolicy, Operation, Resource, authorize},
    errors::SalesError,
    repositories::ad_spends::AdSpendRepository,
    value_objects::{
        ad_spends::{AdSpendModel, EditAdSpendModel, InsertAdSpendModel, ListAdSpendsFilter},
        timestamps::{Clock, creation_stamp, refresh_updated_at},
    },
};

pub struct AdSpendUseCase<R, P, C>
where
    R: AdSpendRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    ad_spend_repository: Arc<R>,
    access_policy: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> AdSpendUseCase<R, P, C>
where
    R: AdSpendRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    pub fn new(ad_spend_repository: Arc<R>, access_policy: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            ad_spend_repository,
            access_policy,
            clock,
        }
    }

    fn authorize(&self, operation: Operation) -> Result<()> {
        authorize(self.access_policy.as_ref(), Resource::AdSpends, operation).map_err(|err| {
            warn!(%operation, "ad_spends: operation denied by access policy");
            err.into()
        })
    }

    fn not_found(ad_spend_id: Uuid) -> SalesError {
        SalesError::NotFound {
            resource: Resource::AdSpends,
            id: ad_spend_id,
        }
    }

    pub async fn create(&self, insert_ad_spend_model: InsertAdSpendModel) -> Result<AdSpendModel> {
        self.authorize(Operation::Insert)?;

        let now = creation_stamp(self.clock.as_ref());
        let insert_ad_spend_entity = insert_ad_spend_model.to_entity(now).map_err(|err| {
            warn!(error = %err, "ad_spends: rejected new ad spend");
            err
        })?;
        let ad_spend_id = insert_ad_spend_entity.id;

        let entity = self
            .ad_spend_repository
            .insert(insert_ad_spend_entity)
            .await
            .map_err(|err| {
                error!(%ad_spend_id, db_error = ?err, "ad_spends: failed to insert ad spend");
                err
            })?;

        info!(%ad_spend_id, "ad_spends: ad spend created");
        Ok(AdSpendModel::from_entity(entity, self.clock.offset()))
    }

    pub async fn get(&self, ad_spend_id: Uuid) -> Result<AdSpendModel> {
        self.authorize(Operation::Select)?;

        let entity = self
            .ad_spend_repository
            .find_by_id(ad_spend_id)
            .await?
            .ok_or_else(|| Self::not_found(ad_spend_id))?;

        Ok(AdSpendModel::from_entity(entity, self.clock.offset()))
    }

    pub async fn update(
        &self,
        ad_spend_id: Uuid,
        edit_ad_spend_model: EditAdSpendModel,
    ) -> Result<AdSpendModel> {
        self.authorize(Operation::Update)?;

        let Some(current) = self.ad_spend_repository.find_by_id(ad_spend_id).await? else {
            warn!(%ad_spend_id, "ad_spends: update on missing ad spend");
            return Err(Self::not_found(ad_spend_id).into());
        };

        let fields = edit_ad_spend_model.merge(&current).map_err(|err| {
            warn!(%ad_spend_id, error = %err, "ad_spends: rejected ad spend update");
            err
        })?;
        let updated_at = refresh_updated_at(self.clock.as_ref(), current.updated_at);

        let entity = self
            .ad_spend_repository
            .update(ad_spend_id, fields.into_changeset(updated_at))
            .await
            .map_err(|err| {
                error!(%ad_spend_id, db_error = ?err, "ad_spends: failed to update ad spend");
                err
            })?
            .ok_or_else(|| Self::not_found(ad_spend_id))?;

        info!(%ad_spend_id, "ad_spends: ad spend updated");
        Ok(AdSpendModel::from_entity(entity, self.clock.offset()))
    }

    pub async fn delete(&self, ad_spend_id: Uuid) -> Result<()> {
        self.authorize(Operation::Delete)?;

        let deleted = self
            .ad_spend_repository
            .delete(ad_spend_id)
            .await
            .map_err(|err| {
                error!(%ad_spend_id, db_error = ?err, "ad_spends: failed to delete ad spend");
                err
            })?;

        if !deleted {
            warn!(%ad_spend_id, "ad_spends: delete on missing ad spend");
            return Err(Self::not_found(ad_spend_id).into());
        }

        info!(%ad_spend_id, "ad_spends: ad spend deleted");
        Ok(())
    }

    pub async fn list(&self, filter: &ListAdSpendsFilter) -> Result<Vec<AdSpendModel>> {
        self.authorize(Operation::Select)?;

        let offset = self.clock.offset();
        let entities = self.ad_spend_repository.list(filter).await?;

        Ok(entities
            .into_iter()
            .map(|entity| AdSpendModel::from_entity(entity, offset))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        access_policy::OpenAccessPolicy, entities::ad_spends::AdSpendEntity,
        repositories::ad_spends::MockAdSpendRepository, value_objects::timestamps::MockClock,
    };
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};
    use mockall::predicate::eq;
    use rust_decimal::Decimal;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn clock_at(instant: DateTime<Utc>) -> MockClock {
        let mut clock = MockClock::new();
        clock
            .expect_now()
            .returning(move || instant.with_timezone(&offset()));
        clock.expect_offset().returning(offset);
        clock
    }

    fn sample_spend(id: Uuid, at: DateTime<Utc>) -> AdSpendEntity {
        AdSpendEntity {
            id,
            description: "Ads".to_string(),
            amount: Decimal::new(5000, 2),
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn update_ignores_a_clock_that_went_backwards() {
        let ad_spend_id = Uuid::new_v4();
        let stored_at = Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap();
        let skewed_now = Utc.with_ymd_and_hms(2025, 5, 5, 11, 0, 0).unwrap();

        let mut repository = MockAdSpendRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(ad_spend_id))
            .returning(move |_| {
                Box::pin(async move { Ok(Some(sample_spend(ad_spend_id, stored_at))) })
            });
        repository
            .expect_update()
            .withf(move |_, changes| changes.updated_at > stored_at)
            .times(1)
            .returning(move |_, changes| {
                Box::pin(async move {
                    let mut row = sample_spend(ad_spend_id, stored_at);
                    row.description = changes.description;
                    row.amount = changes.amount;
                    row.updated_at = changes.updated_at;
                    Ok(Some(row))
                })
            });

        let usecase = AdSpendUseCase::new(
            Arc::new(repository),
            Arc::new(OpenAccessPolicy),
            Arc::new(clock_at(skewed_now)),
        );

        let spend = usecase
            .update(
                ad_spend_id,
                EditAdSpendModel {
                    description: Some("Summer campaign".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(spend.description, "Summer campaign");
        assert!(spend.updated_at > spend.created_at);
    }

    #[tokio::test]
    async fn get_missing_ad_spend_is_not_found() {
        let ad_spend_id = Uuid::new_v4();
        let mut repository = MockAdSpendRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = AdSpendUseCase::new(
            Arc::new(repository),
            Arc::new(OpenAccessPolicy),
            Arc::new(clock_at(Utc::now())),
        );

        let err = usecase.get(ad_spend_id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("ad_spends {ad_spend_id} not found")
        );
    }
}
