use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::ad_spends::{AdSpendEntity, InsertAdSpendEntity, UpdateAdSpendEntity},
    errors::SalesError,
    value_objects::{
        enums::sort_order::SortOrder,
        validation::{positive_amount, required_text},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSpendModel {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl AdSpendModel {
    pub fn from_entity(entity: AdSpendEntity, offset: FixedOffset) -> Self {
        Self {
            id: entity.id,
            description: entity.description,
            amount: entity.amount,
            created_at: entity.created_at.with_timezone(&offset),
            updated_at: entity.updated_at.with_timezone(&offset),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertAdSpendModel {
    pub description: String,
    pub amount: Decimal,
}

impl InsertAdSpendModel {
    pub fn to_entity(&self, now: DateTime<Utc>) -> Result<InsertAdSpendEntity, SalesError> {
        let fields = AdSpendFields::validate(&self.description, self.amount)?;

        Ok(InsertAdSpendEntity {
            id: Uuid::new_v4(),
            description: fields.description,
            amount: fields.amount,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditAdSpendModel {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl EditAdSpendModel {
    pub fn merge(&self, current: &AdSpendEntity) -> Result<AdSpendFields, SalesError> {
        AdSpendFields::validate(
            self.description.as_deref().unwrap_or(&current.description),
            self.amount.unwrap_or(current.amount),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdSpendFields {
    pub description: String,
    pub amount: Decimal,
}

impl AdSpendFields {
    fn validate(description: &str, amount: Decimal) -> Result<Self, SalesError> {
        Ok(Self {
            description: required_text("description", description)?,
            amount: positive_amount(amount)?,
        })
    }

    pub fn into_changeset(self, updated_at: DateTime<Utc>) -> UpdateAdSpendEntity {
        UpdateAdSpendEntity {
            description: self.description,
            amount: self.amount,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ListAdSpendsFilter {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub sort_order: SortOrder,
}

impl ListAdSpendsFilter {
    pub fn matches(&self, spend: &AdSpendEntity) -> bool {
        self.created_from.is_none_or(|from| spend.created_at >= from)
            && self.created_to.is_none_or(|to| spend.created_at < to)
    }
}
