use anyhow::Result;
use sales_tracker::{
    application::usecases::dashboard::DashboardUseCase,
    config::config_loader,
    domain::access_policy::OpenAccessPolicy,
    infrastructure::postgres::{
        postgres_connection,
        repositories::{ad_spends::AdSpendPostgres, sales::SalePostgres},
    },
    observability,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        error!("sales-report exited with error: {:?}", error);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    observability::init_observability("sales-report")?;

    let dotenvy_env = config_loader::load()?;
    info!(stage = %dotenvy_env.stage, "ENV has been loaded");

    let postgres_pool = Arc::new(postgres_connection::establish_connection(
        &dotenvy_env.database.url,
    )?);
    info!("Postgres connection has been established");

    let usecase = DashboardUseCase::new(
        Arc::new(SalePostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(AdSpendPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(OpenAccessPolicy),
        dotenvy_env.timezone.offset,
    );

    let report = json!({
        "dashboard": usecase.dashboard_stats().await?,
        "sales_by_plan": usecase.sales_by_plan_stats().await?,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
