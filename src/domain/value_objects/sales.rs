use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::sales::{InsertSaleEntity, SaleEntity, UpdateSaleEntity},
    errors::SalesError,
    value_objects::{
        enums::{sale_kinds::SaleKind, sale_plans::SalePlan, sort_order::SortOrder},
        validation::{positive_amount, required_text},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleModel {
    pub id: Uuid,
    pub name: String,
    pub plan: SalePlan,
    pub kind: SaleKind,
    pub amount: Decimal,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl SaleModel {
    /// Converts a stored row, rendering its timestamps in `offset`.
    pub fn from_entity(entity: SaleEntity, offset: FixedOffset) -> Result<Self> {
        let plan = SalePlan::try_from(entity.plan.as_str())
            .map_err(|err| anyhow!("stored sale {} is corrupt: {}", entity.id, err))?;
        let kind = SaleKind::try_from(entity.kind.as_str())
            .map_err(|err| anyhow!("stored sale {} is corrupt: {}", entity.id, err))?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            plan,
            kind,
            amount: entity.amount,
            created_at: entity.created_at.with_timezone(&offset),
            updated_at: entity.updated_at.with_timezone(&offset),
        })
    }
}

/// Caller input for a new sale. Enum fields arrive as text and are checked
/// against the allowed labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertSaleModel {
    pub name: String,
    pub plan: String,
    #[serde(default)]
    pub kind: Option<String>,
    pub amount: Decimal,
}

impl InsertSaleModel {
    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<InsertSaleEntity, SalesError> {
        let fields = SaleFields::validate(
            &self.name,
            &self.plan,
            self.kind.as_deref(),
            self.amount,
        )?;

        Ok(InsertSaleEntity {
            id: Uuid::new_v4(),
            name: fields.name,
            plan: fields.plan.to_string(),
            kind: fields.kind.to_string(),
            amount: fields.amount,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. Unset fields keep their stored value. There is no
/// `updated_at` here: the store always stamps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditSaleModel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl EditSaleModel {
    /// Merges the patch over `current` and validates the result as a whole.
    pub fn merge(&self, current: &SaleEntity) -> Result<SaleFields, SalesError> {
        SaleFields::validate(
            self.name.as_deref().unwrap_or(&current.name),
            self.plan.as_deref().unwrap_or(&current.plan),
            Some(self.kind.as_deref().unwrap_or(&current.kind)),
            self.amount.unwrap_or(current.amount),
        )
    }
}

/// Validated mutable fields of a sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleFields {
    pub name: String,
    pub plan: SalePlan,
    pub kind: SaleKind,
    pub amount: Decimal,
}

impl SaleFields {
    fn validate(
        name: &str,
        plan: &str,
        kind: Option<&str>,
        amount: Decimal,
    ) -> Result<Self, SalesError> {
        Ok(Self {
            name: required_text("name", name)?,
            plan: SalePlan::try_from(plan)?,
            kind: kind.map(SaleKind::try_from).transpose()?.unwrap_or_default(),
            amount: positive_amount(amount)?,
        })
    }

    pub fn into_changeset(self, updated_at: DateTime<Utc>) -> UpdateSaleEntity {
        UpdateSaleEntity {
            name: self.name,
            plan: self.plan.to_string(),
            kind: self.kind.to_string(),
            amount: self.amount,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListSalesFilter {
    pub plan: Option<SalePlan>,
    pub kind: Option<SaleKind>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub created_to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub sort_order: SortOrder,
}

impl ListSalesFilter {
    pub fn matches(&self, sale: &SaleEntity) -> bool {
        self.plan.is_none_or(|plan| sale.plan == plan.as_str())
            && self.kind.is_none_or(|kind| sale.kind == kind.as_str())
            && self.created_from.is_none_or(|from| sale.created_at >= from)
            && self.created_to.is_none_or(|to| sale.created_at < to)
    }
}
