use std::sync::Arc;

use crate::config::{Config, LogFormat};
use stockroom_core::audit::{AuditService, AuditServiceTrait};
use stockroom_core::catalog::{CatalogService, CatalogServiceTrait};
use stockroom_core::reports::stock_summary::{StockSummaryService, StockSummaryServiceTrait};
use stockroom_core::transactions::{TransactionService, TransactionServiceTrait};
use stockroom_core::users::{UserService, UserServiceTrait};
use stockroom_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, AuditRepository, CategoryRepository,
    ItemRepository, OutletRepository, StockSummaryRepository, SupplierRepository,
    TransactionRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub audit_service: Arc<dyn AuditServiceTrait>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub stock_summary_service: Arc<dyn StockSummaryServiceTrait>,
}

/// Logs go to stderr so stdout carries only the report.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Plain => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Opens the database and wires every service. Must run inside a tokio
/// runtime: the writer actor is spawned here.
pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let pool = create_pool(&config.db_path, config.pool_size)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.as_ref().clone());

    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let item_repo = Arc::new(ItemRepository::new(pool.clone(), writer.clone()));
    let supplier_repo = Arc::new(SupplierRepository::new(pool.clone(), writer.clone()));
    let outlet_repo = Arc::new(OutletRepository::new(pool.clone(), writer.clone()));
    let catalog_service = Arc::new(CatalogService::new(
        category_repo,
        item_repo,
        supplier_repo,
        outlet_repo,
    ));

    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let transaction_service = Arc::new(TransactionService::new(transaction_repo));

    let audit_repo = Arc::new(AuditRepository::new(pool.clone()));
    let audit_service = Arc::new(AuditService::new(audit_repo));

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer));
    let user_service = Arc::new(UserService::new(user_repo));

    let stock_summary_repo = Arc::new(StockSummaryRepository::new(pool));
    let stock_summary_service = Arc::new(StockSummaryService::new(
        stock_summary_repo,
        config.reporting_tz,
    ));

    Ok(AppState {
        catalog_service,
        transaction_service,
        audit_service,
        user_service,
        stock_summary_service,
    })
}
