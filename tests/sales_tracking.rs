use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use sales_tracker::{
    application::usecases::{
        ad_spends::AdSpendUseCase, dashboard::DashboardUseCase, sales::SaleUseCase,
    },
    domain::{
        access_policy::OpenAccessPolicy,
        errors::SalesError,
        value_objects::{
            ad_spends::InsertAdSpendModel,
            enums::{sale_plans::SalePlan, sort_order::SortOrder},
            sales::{EditSaleModel, InsertSaleModel, ListSalesFilter},
            timestamps::Clock,
        },
    },
    infrastructure::memory::{ad_spends::AdSpendMemory, sales::SaleMemory},
};
use serde_json::json;

/// Advances one second per reading so ordering assertions are deterministic.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
    offset: FixedOffset,
}

impl SteppingClock {
    fn new() -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
            offset: FixedOffset::west_opt(3 * 3600).unwrap(),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        (self.start + Duration::seconds(tick)).with_timezone(&self.offset)
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

struct Harness {
    sales_store: SaleMemory,
    sales: SaleUseCase<SaleMemory, OpenAccessPolicy, SteppingClock>,
    ad_spends: AdSpendUseCase<AdSpendMemory, OpenAccessPolicy, SteppingClock>,
    dashboard: DashboardUseCase<SaleMemory, AdSpendMemory, OpenAccessPolicy>,
}

fn harness() -> Harness {
    let sales_store = SaleMemory::new();
    let ad_spend_store = AdSpendMemory::new();
    let policy = Arc::new(OpenAccessPolicy);
    let clock = Arc::new(SteppingClock::new());
    let offset = clock.offset();

    Harness {
        sales: SaleUseCase::new(
            Arc::new(sales_store.clone()),
            Arc::clone(&policy),
            Arc::clone(&clock),
        ),
        ad_spends: AdSpendUseCase::new(
            Arc::new(ad_spend_store.clone()),
            Arc::clone(&policy),
            Arc::clone(&clock),
        ),
        dashboard: DashboardUseCase::new(
            Arc::new(sales_store.clone()),
            Arc::new(ad_spend_store),
            policy,
            offset,
        ),
        sales_store,
    }
}

fn new_sale(name: &str, plan: &str, cents: i64) -> InsertSaleModel {
    InsertSaleModel {
        name: name.to_string(),
        plan: plan.to_string(),
        kind: None,
        amount: Decimal::new(cents, 2),
    }
}

fn new_ad_spend(description: &str, cents: i64) -> InsertAdSpendModel {
    InsertAdSpendModel {
        description: description.to_string(),
        amount: Decimal::new(cents, 2),
    }
}

#[tokio::test]
async fn dashboard_matches_worked_example() {
    let h = harness();
    h.sales.create(new_sale("Ana", "Monthly", 15000)).await.unwrap();
    h.ad_spends.create(new_ad_spend("Ads", 5000)).await.unwrap();

    let stats = h.dashboard.dashboard_stats().await.unwrap();

    assert_eq!(stats["total_sales"], json!(150.0));
    assert_eq!(stats["total_trafego"], json!(50.0));
    assert_eq!(stats["net_profit"], json!(100.0));
    assert_eq!(stats["roi"], json!(200.0));
    assert_eq!(stats["sales_count"], json!(1));
    assert_eq!(stats["trafego_count"], json!(1));
}

#[tokio::test]
async fn rejected_inserts_leave_the_store_unchanged() {
    let h = harness();

    for input in [
        new_sale("Ana", "Monthly", 0),
        new_sale("Ana", "Weekly", 1000),
        new_sale("   ", "Monthly", 1000),
        InsertSaleModel {
            amount: Decimal::new(1, 3),
            ..new_sale("Ana", "Monthly", 0)
        },
        InsertSaleModel {
            amount: Decimal::from(100_000_000_000i64),
            ..new_sale("Ana", "Monthly", 0)
        },
        InsertSaleModel {
            amount: Decimal::MAX,
            ..new_sale("Ana", "Monthly", 0)
        },
    ] {
        let err = h.sales.create(input).await.unwrap_err();
        assert!(
            err.downcast_ref::<SalesError>().unwrap().is_validation(),
            "got: {err}"
        );
    }

    assert!(h.sales_store.is_empty().await);
    let summary = h.dashboard.sales_summary().await.unwrap();
    assert_eq!(summary.count, 0);
}

#[tokio::test]
async fn empty_stores_produce_zeroed_views() {
    let h = harness();

    let summary = h.dashboard.sales_summary().await.unwrap();
    assert_eq!(summary.count, 0);
    assert_eq!(summary.sum, Decimal::ZERO);
    assert_eq!(summary.average, Decimal::ZERO);

    let dashboard = h.dashboard.dashboard().await.unwrap();
    assert_eq!(dashboard.roi, Decimal::ZERO);
    assert_eq!(h.dashboard.sales_by_plan_stats().await.unwrap(), json!([]));
}

#[tokio::test]
async fn updates_always_move_updated_at_forward() {
    let h = harness();
    let sale = h.sales.create(new_sale("Ana", "Monthly", 15000)).await.unwrap();
    assert_eq!(sale.updated_at, sale.created_at);

    // A client-supplied updated_at is not part of the edit model and is dropped.
    let edit: EditSaleModel = serde_json::from_value(json!({
        "name": "Ana Maria",
        "updated_at": "2000-01-01T00:00:00Z",
    }))
    .unwrap();

    let first = h.sales.update(sale.id, edit).await.unwrap();
    let second = h
        .sales
        .update(sale.id, EditSaleModel::default())
        .await
        .unwrap();

    assert_eq!(first.name, "Ana Maria");
    assert_eq!(first.created_at, sale.created_at);
    assert!(first.updated_at > sale.updated_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn invalid_update_keeps_the_stored_record() {
    let h = harness();
    let sale = h.sales.create(new_sale("Ana", "Monthly", 15000)).await.unwrap();

    let err = h
        .sales
        .update(
            sale.id,
            EditSaleModel {
                amount: Some(Decimal::new(-1, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<SalesError>().unwrap().is_validation());

    assert_eq!(h.sales.get(sale.id).await.unwrap(), sale);
}

#[tokio::test]
async fn deleting_a_sale_only_affects_sales_aggregates() {
    let h = harness();
    let kept = h.sales.create(new_sale("Ana", "Monthly", 15000)).await.unwrap();
    let removed = h.sales.create(new_sale("Bia", "Annual", 90000)).await.unwrap();
    h.ad_spends.create(new_ad_spend("Ads", 5000)).await.unwrap();

    h.sales.delete(removed.id).await.unwrap();
    assert_eq!(h.sales_store.len().await, 1);

    let summary = h.dashboard.sales_summary().await.unwrap();
    assert_eq!(summary.count, 1);
    assert_eq!(summary.sum, kept.amount);

    let ad_spend_summary = h.dashboard.ad_spend_summary().await.unwrap();
    assert_eq!(ad_spend_summary.count, 1);
    assert_eq!(ad_spend_summary.sum, Decimal::new(5000, 2));

    let err = h.sales.delete(removed.id).await.unwrap_err();
    assert!(err.downcast_ref::<SalesError>().unwrap().is_not_found());
}

#[tokio::test]
async fn sales_by_plan_puts_the_busiest_plan_first() {
    let h = harness();
    for _ in 0..3 {
        h.sales.create(new_sale("A", "Quarterly", 1000)).await.unwrap();
    }
    for _ in 0..5 {
        h.sales.create(new_sale("B", "Semiannual", 1000)).await.unwrap();
    }

    let breakdown = h.dashboard.sales_by_plan().await.unwrap();
    assert_eq!(breakdown[0].plan, SalePlan::Semiannual);
    assert_eq!(breakdown[0].quantity, 5);
    assert_eq!(breakdown[1].plan, SalePlan::Quarterly);
    assert_eq!(breakdown[1].quantity, 3);
}

#[tokio::test]
async fn list_defaults_to_newest_first() {
    let h = harness();
    let first = h.sales.create(new_sale("Ana", "Monthly", 1000)).await.unwrap();
    let second = h.sales.create(new_sale("Bia", "Annual", 2000)).await.unwrap();
    let third = h.sales.create(new_sale("Caio", "Monthly", 3000)).await.unwrap();

    let newest_first: Vec<_> = h
        .sales
        .list(&ListSalesFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|sale| sale.id)
        .collect();
    assert_eq!(newest_first, vec![third.id, second.id, first.id]);

    let monthly_oldest_first: Vec<_> = h
        .sales
        .list(&ListSalesFilter {
            plan: Some(SalePlan::Monthly),
            sort_order: SortOrder::Asc,
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap()
        .into_iter()
        .map(|sale| sale.id)
        .collect();
    assert_eq!(monthly_oldest_first, vec![first.id]);
}
