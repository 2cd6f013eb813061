#[double]
use crate::bid::service::Service as BidService;
#[double]
use crate::contract::service::Service as ContractService;
#[double]
use crate::rfq::service::Service as RfqService;
use {
    crate::{
        api,
        config::{
            Config,
            RunOptions,
        },
        metrics::{
            setup_metrics_recorder,
            start_metrics,
        },
        state::{
            Store,
            StoreNew,
        },
    },
    anyhow::anyhow,
    futures::future::join_all,
    mockall_double::double,
    sqlx::postgres::PgPoolOptions,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = err.to_string(), "Failed to listen for shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(run_options.server.database_max_connections)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to the database: {:?}", err))?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;

    let store = Arc::new(Store::new(
        pool.clone(),
        run_options.secret_key.clone(),
        setup_metrics_recorder()?,
    ));
    let rfq_service = Arc::new(RfqService::new(pool.clone(), config.lifecycle.clone()));
    let bid_service = Arc::new(BidService::new(
        pool.clone(),
        rfq_service.clone(),
        config.lifecycle.clone(),
    ));
    let contract_service = Arc::new(ContractService::new(
        pool,
        rfq_service.clone(),
        bid_service.clone(),
    ));
    let store_new = Arc::new(StoreNew::new(
        store.clone(),
        rfq_service,
        bid_service,
        contract_service,
    ));

    let server_loop = tokio::spawn(api::start_api(run_options.clone(), store_new));
    let metrics_loop = tokio::spawn(start_metrics(run_options, store));
    for result in join_all(vec![server_loop, metrics_loop]).await {
        result??;
    }
    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
