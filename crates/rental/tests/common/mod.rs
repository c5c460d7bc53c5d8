#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use prometheus_client::registry::Registry;
use rental::{
    abstract_trait::{
        notifier::{DynRentalNotifier, RentalNotifierTrait},
        product::ProductCommandRepositoryTrait,
        rental::repository::DynRentalCommandRepository,
    },
    domain::{
        event::RentalEvent,
        requests::{pricing::CartItemRequest, rental::CreateRentalRequest},
    },
    model::product::{NewProduct, ProductCategory},
    repository::MemoryStore,
    service::{AvailabilityService, RentalCommandService, RentalCommandServiceDeps, RentalQueryService},
};
use shared::errors::ServiceError;
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

pub const PLATES: NewProduct = NewProduct {
    name: "Dinner Plate",
    description: "27 cm porcelain dinner plate",
    category: ProductCategory::Plates,
    total_stock: 100,
    co2_saved: 0.5,
    water_saved: 2.0,
};

pub const GLASSES: NewProduct = NewProduct {
    name: "Wine Glass",
    description: "Stemmed wine glass",
    category: ProductCategory::Glasses,
    total_stock: 100,
    co2_saved: 0.25,
    water_saved: 1.0,
};

/// Product ids assigned by the memory store, in seeding order.
pub const PLATES_ID: i32 = 1;
pub const GLASSES_ID: i32 = 2;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, d).unwrap()
}

pub fn item(product_id: i32, quantity: i32) -> CartItemRequest {
    CartItemRequest {
        product_id,
        quantity,
    }
}

pub fn rental_request(items: Vec<CartItemRequest>, start: u32, end: u32) -> CreateRentalRequest {
    CreateRentalRequest {
        customer_name: "Ada Lovelace".into(),
        customer_email: "ada@example.com".into(),
        phone_number: Some("+44 20 7946 0000".into()),
        items,
        start_date: day(start).format("%Y-%m-%d").to_string(),
        end_date: day(end).format("%Y-%m-%d").to_string(),
    }
}

pub async fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.seed_products(&[PLATES, GLASSES]).await.unwrap();
    store
}

/// Forwards every event to a channel so tests can await delivery.
pub struct ChannelNotifier(pub mpsc::UnboundedSender<RentalEvent>);

#[async_trait]
impl RentalNotifierTrait for ChannelNotifier {
    async fn notify(&self, event: &RentalEvent) -> Result<(), ServiceError> {
        let _ = self.0.send(event.clone());
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl RentalNotifierTrait for FailingNotifier {
    async fn notify(&self, _event: &RentalEvent) -> Result<(), ServiceError> {
        Err(ServiceError::Kafka("broker unreachable".into()))
    }
}

pub struct Services {
    pub store: Arc<MemoryStore>,
    pub command: Arc<RentalCommandService>,
    pub availability: AvailabilityService,
    pub query: RentalQueryService,
}

pub fn services_with(
    store: Arc<MemoryStore>,
    command_repo: DynRentalCommandRepository,
    notifier: DynRentalNotifier,
    reservation_timeout: Duration,
) -> Services {
    let mut registry = Registry::default();

    let command = Arc::new(RentalCommandService::new(
        RentalCommandServiceDeps {
            products: store.clone(),
            command: command_repo,
            query: store.clone(),
            notifier,
            reservation_timeout,
        },
        &mut registry,
    ));

    let availability = AvailabilityService::new(store.clone(), store.clone(), &mut registry);
    let query = RentalQueryService::new(store.clone(), &mut registry);

    Services {
        store,
        command,
        availability,
        query,
    }
}

pub async fn services() -> (Services, mpsc::UnboundedReceiver<RentalEvent>) {
    let store = seeded_store().await;
    let (tx, rx) = mpsc::unbounded_channel();
    let services = services_with(
        store.clone(),
        store,
        Arc::new(ChannelNotifier(tx)),
        Duration::from_secs(10),
    );
    (services, rx)
}
