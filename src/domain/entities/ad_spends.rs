use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::ad_spends;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = ad_spends)]
pub struct AdSpendEntity {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = ad_spends)]
pub struct InsertAdSpendEntity {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = ad_spends)]
pub struct UpdateAdSpendEntity {
    pub description: String,
    pub amount: Decimal,
    pub updated_at: DateTime<Utc>,
}
