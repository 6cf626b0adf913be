//! Read-only projections over a snapshot of the stores. Nothing here is
//! cached; callers recompute on every query.

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use chrono::{DateTime, FixedOffset};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    ad_spends::AdSpendModel, enums::sale_plans::SalePlan, sales::SaleModel,
};

const RATIO_DECIMALS: u32 = 2;

fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}

fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| anyhow!("amount total overflowed"))
    })
}

fn average(sum: Decimal, count: i64) -> Result<Decimal> {
    if count == 0 {
        return Ok(Decimal::ZERO);
    }
    sum.checked_div(Decimal::from(count))
        .map(round_ratio)
        .ok_or_else(|| anyhow!("average of {count} amounts overflowed"))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesSummary {
    pub count: i64,
    pub sum: Decimal,
    pub average: Decimal,
    pub first_sale: Option<DateTime<FixedOffset>>,
    pub last_sale: Option<DateTime<FixedOffset>>,
}

pub fn summarize_sales(sales: &[SaleModel]) -> Result<SalesSummary> {
    let count = sales.len() as i64;
    let sum = checked_total(sales.iter().map(|sale| sale.amount))?;

    Ok(SalesSummary {
        count,
        sum,
        average: average(sum, count)?,
        first_sale: sales.iter().map(|sale| sale.created_at).min(),
        last_sale: sales.iter().map(|sale| sale.created_at).max(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanBreakdown {
    pub plan: SalePlan,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub average_amount: Decimal,
}

/// Groups sales per plan, busiest plan first. Plans with equal counts keep
/// their declaration order.
pub fn sales_by_plan(sales: &[SaleModel]) -> Result<Vec<PlanBreakdown>> {
    let mut groups: BTreeMap<SalePlan, (i64, Decimal)> = BTreeMap::new();
    for sale in sales {
        let entry = groups.entry(sale.plan).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry
            .1
            .checked_add(sale.amount)
            .ok_or_else(|| anyhow!("{} total overflowed", sale.plan.as_str()))?;
    }

    let mut breakdown = groups
        .into_iter()
        .map(|(plan, (quantity, total_amount))| -> Result<PlanBreakdown> {
            Ok(PlanBreakdown {
                plan,
                quantity,
                total_amount,
                average_amount: average(total_amount, quantity)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    breakdown.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.plan.cmp(&b.plan)));
    Ok(breakdown)
}

/// Element of the sales-by-plan query function output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanStatsItem {
    pub plan: SalePlan,
    pub quantity: i64,
    pub total_amount: Decimal,
}

impl From<&PlanBreakdown> for PlanStatsItem {
    fn from(value: &PlanBreakdown) -> Self {
        Self {
            plan: value.plan,
            quantity: value.quantity,
            total_amount: value.total_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSpendSummary {
    pub count: i64,
    pub sum: Decimal,
    pub first_spend: Option<DateTime<FixedOffset>>,
    pub last_spend: Option<DateTime<FixedOffset>>,
}

pub fn summarize_ad_spends(spends: &[AdSpendModel]) -> Result<AdSpendSummary> {
    Ok(AdSpendSummary {
        count: spends.len() as i64,
        sum: checked_total(spends.iter().map(|spend| spend.amount))?,
        first_spend: spends.iter().map(|spend| spend.created_at).min(),
        last_spend: spends.iter().map(|spend| spend.created_at).max(),
    })
}

/// Combined sales and ad-spend figures. Ad spend keeps its `trafego` wire
/// names for the consuming dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub total_sales: Decimal,
    pub sales_count: i64,
    pub average_sale: Decimal,
    #[serde(rename = "total_trafego")]
    pub total_ad_spend: Decimal,
    #[serde(rename = "trafego_count")]
    pub ad_spend_count: i64,
    pub net_profit: Decimal,
    pub roi: Decimal,
}

impl Dashboard {
    pub fn from_summaries(sales: &SalesSummary, ad_spends: &AdSpendSummary) -> Result<Self> {
        Ok(Self {
            total_sales: sales.sum,
            sales_count: sales.count,
            average_sale: sales.average,
            total_ad_spend: ad_spends.sum,
            ad_spend_count: ad_spends.count,
            net_profit: sales
                .sum
                .checked_sub(ad_spends.sum)
                .ok_or_else(|| anyhow!("net profit overflowed"))?,
            roi: roi_percentage(sales.sum, ad_spends.sum)?,
        })
    }
}

/// `((sales - spend) / spend) * 100`, or zero when nothing was spent.
pub fn roi_percentage(total_sales: Decimal, total_spend: Decimal) -> Result<Decimal> {
    if total_spend <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    total_sales
        .checked_sub(total_spend)
        .and_then(|profit| profit.checked_div(total_spend))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(round_ratio)
        .ok_or_else(|| anyhow!("roi of {total_sales} over {total_spend} overflowed"))
}
