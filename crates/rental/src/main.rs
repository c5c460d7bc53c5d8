use anyhow::{Context, Result};
use rental::{
    abstract_trait::notifier::DynRentalNotifier,
    config::myconfig::Config,
    di::{DependenciesInjectDeps, StorageBackend},
    handler::AppRouter,
    notifier::{KafkaRentalNotifier, LoggingNotifier},
    repository::MemoryStore,
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool, Kafka},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::init("rental-service", &config.otel_endpoint)
        .context("Failed to initialize telemetry")?;

    init_logger(
        telemetry.logger_provider(),
        "rental-service",
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Rental Service initialization...");

    let state = setup(&config).await.context("Failed to setup application")?;

    let result = AppRouter::serve(config.port, state).await;

    if let Err(e) = &result {
        error!("💀 Server stopped with error: {e:?}");
    }

    if let Err(e) = telemetry.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Rental Service shutdown complete.");
    result
}

async fn setup(config: &Config) -> Result<AppState> {
    let storage = match &config.database_url {
        Some(url) => {
            let pool = ConnectionManager::new_pool(url, config.db_min_conn, config.db_max_conn)
                .await
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            StorageBackend::Postgres(pool)
        }
        None => {
            warn!("⚠️ DATABASE_URL not set, using in-memory storage (single instance only)");
            StorageBackend::Memory(Arc::new(MemoryStore::new()))
        }
    };

    let notifier: DynRentalNotifier = match &config.kafka_broker {
        Some(brokers) => {
            let kafka = Kafka::new(brokers).context("Failed to create Kafka producer")?;
            Arc::new(KafkaRentalNotifier::new(Arc::new(kafka)))
        }
        None => {
            info!("📭 KAFKA not set, rental events are only logged");
            Arc::new(LoggingNotifier)
        }
    };

    let deps = DependenciesInjectDeps {
        storage,
        notifier,
        reservation_timeout: config.reservation_timeout(),
    };

    let state = AppState::new(deps, config.admin_token.clone());

    state
        .di_container
        .product_service
        .seed_defaults()
        .await
        .context("Failed to seed product catalogue")?;

    if !state.admin.is_enabled() {
        warn!("⚠️ ADMIN_TOKEN not set, admin routes are open");
    }

    info!("✅ Application setup completed successfully.");
    Ok(state)
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Database migrations applied");
    Ok(())
}
