use anyhow::Result;
use chrono::FixedOffset;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::{
    access_policy::{AccessPolicy, Operation, Resource, authorize},
    repositories::{ad_spends::AdSpendRepository, sales::SaleRepository},
    value_objects::{
        ad_spends::{AdSpendModel, ListAdSpendsFilter},
        sales::{ListSalesFilter, SaleModel},
        summaries::{
            self, AdSpendSummary, Dashboard, PlanBreakdown, PlanStatsItem, SalesSummary,
        },
    },
};

/// Aggregation views and the JSON-shaped query functions built on them.
/// Every call reads a fresh snapshot of both stores.
pub struct DashboardUseCase<S, A, P>
where
    S: SaleRepository + Send + Sync + 'static,
    A: AdSpendRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
{
    sale_repository: Arc<S>,
    ad_spend_repository: Arc<A>,
    access_policy: Arc<P>,
    offset: FixedOffset,
}

impl<S, A, P> DashboardUseCase<S, A, P>
where
    S: SaleRepository + Send + Sync + 'static,
    A: AdSpendRepository + Send + Sync + 'static,
    P: AccessPolicy + Send + Sync + 'static,
{
    pub fn new(
        sale_repository: Arc<S>,
        ad_spend_repository: Arc<A>,
        access_policy: Arc<P>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            sale_repository,
            ad_spend_repository,
            access_policy,
            offset,
        }
    }

    async fn load_sales(&self) -> Result<Vec<SaleModel>> {
        authorize(self.access_policy.as_ref(), Resource::Sales, Operation::Select).map_err(
            |err| {
                warn!("dashboard: sales read denied by access policy");
                err
            },
        )?;

        let entities = self
            .sale_repository
            .list(&ListSalesFilter::default())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to load sales snapshot");
                err
            })?;

        debug!(rows = entities.len(), "dashboard: loaded sales snapshot");
        entities
            .into_iter()
            .map(|entity| SaleModel::from_entity(entity, self.offset))
            .collect()
    }

    async fn load_ad_spends(&self) -> Result<Vec<AdSpendModel>> {
        authorize(self.access_policy.as_ref(), Resource::AdSpends, Operation::Select).map_err(
            |err| {
                warn!("dashboard: ad spend read denied by access policy");
                err
            },
        )?;

        let entities = self
            .ad_spend_repository
            .list(&ListAdSpendsFilter::default())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to load ad spend snapshot");
                err
            })?;

        debug!(rows = entities.len(), "dashboard: loaded ad spend snapshot");
        Ok(entities
            .into_iter()
            .map(|entity| AdSpendModel::from_entity(entity, self.offset))
            .collect())
    }

    pub async fn sales_summary(&self) -> Result<SalesSummary> {
        let sales = self.load_sales().await?;
        summaries::summarize_sales(&sales)
    }

    pub async fn sales_by_plan(&self) -> Result<Vec<PlanBreakdown>> {
        let sales = self.load_sales().await?;
        summaries::sales_by_plan(&sales)
    }

    pub async fn ad_spend_summary(&self) -> Result<AdSpendSummary> {
        let spends = self.load_ad_spends().await?;
        summaries::summarize_ad_spends(&spends)
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let sales = self.sales_summary().await?;
        let ad_spends = self.ad_spend_summary().await?;
        Dashboard::from_summaries(&sales, &ad_spends)
    }

    /// The dashboard as one JSON object.
    pub async fn dashboard_stats(&self) -> Result<Value> {
        let dashboard = self.dashboard().await?;
        Ok(serde_json::to_value(dashboard)?)
    }

    /// `[{plan, quantity, total_amount}, ...]`, busiest plan first; `[]` when
    /// there are no sales.
    pub async fn sales_by_plan_stats(&self) -> Result<Value> {
        let items: Vec<PlanStatsItem> = self
            .sales_by_plan()
            .await?
            .iter()
            .map(PlanStatsItem::from)
            .collect();
        Ok(serde_json::to_value(items)?)
    }
}
