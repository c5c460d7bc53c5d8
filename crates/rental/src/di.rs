use crate::{
    abstract_trait::{
        inventory::{DynAvailabilityService, DynInventoryRepository},
        notifier::DynRentalNotifier,
        pricing::DynPricingService,
        product::{DynProductCommandRepository, DynProductQueryRepository, DynProductService},
        rental::{
            repository::{DynRentalCommandRepository, DynRentalQueryRepository},
            service::{DynRentalCommandService, DynRentalQueryService},
        },
    },
    repository::{
        InventoryRepository, MemoryStore, ProductRepository, RentalCommandRepository,
        RentalQueryRepository,
    },
    service::{
        AvailabilityService, PricingService, ProductCatalogService, RentalCommandService,
        RentalCommandServiceDeps, RentalQueryService,
    },
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc, time::Duration};

#[derive(Clone)]
pub enum StorageBackend {
    Postgres(ConnectionPool),
    /// Single-process only; reservations are serialised by an in-process lock.
    Memory(Arc<MemoryStore>),
}

struct Repositories {
    product_query: DynProductQueryRepository,
    product_command: DynProductCommandRepository,
    inventory: DynInventoryRepository,
    rental_command: DynRentalCommandRepository,
    rental_query: DynRentalQueryRepository,
}

impl StorageBackend {
    fn repositories(&self, lock_timeout: Duration) -> Repositories {
        match self {
            StorageBackend::Postgres(pool) => {
                let products = Arc::new(ProductRepository::new(pool.clone()));
                Repositories {
                    product_query: products.clone(),
                    product_command: products,
                    inventory: Arc::new(InventoryRepository::new(pool.clone())),
                    rental_command: Arc::new(RentalCommandRepository::new(
                        pool.clone(),
                        lock_timeout,
                    )),
                    rental_query: Arc::new(RentalQueryRepository::new(pool.clone())),
                }
            }
            StorageBackend::Memory(store) => Repositories {
                product_query: store.clone(),
                product_command: store.clone(),
                inventory: store.clone(),
                rental_command: store.clone(),
                rental_query: store.clone(),
            },
        }
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub storage: StorageBackend,
    pub notifier: DynRentalNotifier,
    pub reservation_timeout: Duration,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: DynProductService,
    pub availability_service: DynAvailabilityService,
    pub pricing_service: DynPricingService,
    pub rental_command: DynRentalCommandService,
    pub rental_query: DynRentalQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &"ProductCatalogService")
            .field("availability_service", &"AvailabilityService")
            .field("pricing_service", &"PricingService")
            .field("rental_command", &"RentalCommandService")
            .field("rental_query", &"RentalQueryService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            storage,
            notifier,
            reservation_timeout,
        } = deps;

        let repos = storage.repositories(reservation_timeout);

        let product_service: DynProductService = Arc::new(ProductCatalogService::new(
            repos.product_query.clone(),
            repos.product_command.clone(),
            registry,
        ));

        let availability_service: DynAvailabilityService = Arc::new(AvailabilityService::new(
            repos.product_query.clone(),
            repos.inventory.clone(),
            registry,
        ));

        let pricing_service: DynPricingService =
            Arc::new(PricingService::new(repos.product_query.clone(), registry));

        let rental_command: DynRentalCommandService = Arc::new(RentalCommandService::new(
            RentalCommandServiceDeps {
                products: repos.product_query.clone(),
                command: repos.rental_command.clone(),
                query: repos.rental_query.clone(),
                notifier,
                reservation_timeout,
            },
            registry,
        ));

        let rental_query: DynRentalQueryService =
            Arc::new(RentalQueryService::new(repos.rental_query.clone(), registry));

        Self {
            product_service,
            availability_service,
            pricing_service,
            rental_command,
            rental_query,
        }
    }
}
