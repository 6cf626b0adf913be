use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::sales;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable)]
#[diesel(table_name = sales)]
pub struct SaleEntity {
    pub id: Uuid,
    pub name: String,
    pub plan: String, // label from value_objects/enums/sale_plans.rs, e.g. Four-monthly
    pub kind: String, // OneTime or Recurring
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = sales)]
pub struct InsertSaleEntity {
    pub id: Uuid,
    pub name: String,
    pub plan: String,
    pub kind: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full replacement of the mutable columns; the use case merges the caller's
/// patch over the stored row before building this.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = sales)]
pub struct UpdateSaleEntity {
    pub name: String,
    pub plan: String,
    pub kind: String,
    pub amount: Decimal,
    pub updated_at: DateTime<Utc>,
}
