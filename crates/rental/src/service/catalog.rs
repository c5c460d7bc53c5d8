use crate::{
    abstract_trait::product::{
        DynProductCommandRepository, DynProductQueryRepository, ProductServiceTrait,
    },
    domain::{requests::product::UpdateProductRequest, response::product::ProductResponse},
    model::product::{NewProduct, ProductCategory},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationTracer},
};
use tracing::info;

pub const DEFAULT_CATALOG: &[NewProduct] = &[
    NewProduct {
        name: "Dinner Plate",
        description: "27 cm porcelain dinner plate",
        category: ProductCategory::Plates,
        total_stock: 100,
        co2_saved: 0.35,
        water_saved: 1.2,
    },
    NewProduct {
        name: "Dessert Plate",
        description: "20 cm porcelain dessert plate",
        category: ProductCategory::Plates,
        total_stock: 100,
        co2_saved: 0.25,
        water_saved: 0.9,
    },
    NewProduct {
        name: "Wine Glass",
        description: "Stemmed wine glass, 35 cl",
        category: ProductCategory::Glasses,
        total_stock: 100,
        co2_saved: 0.2,
        water_saved: 0.8,
    },
    NewProduct {
        name: "Tumbler",
        description: "Water tumbler, 25 cl",
        category: ProductCategory::Glasses,
        total_stock: 100,
        co2_saved: 0.15,
        water_saved: 0.6,
    },
    NewProduct {
        name: "Cutlery Set",
        description: "Stainless steel knife, fork and spoon",
        category: ProductCategory::Cutlery,
        total_stock: 100,
        co2_saved: 0.1,
        water_saved: 0.4,
    },
];

#[derive(Clone)]
pub struct ProductCatalogService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    tracer: OperationTracer,
}

impl ProductCatalogService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        registry: &mut Registry,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(registry, "product_catalog_service", "ProductCatalogService");

        Self {
            query,
            command,
            tracer: OperationTracer::new("product-catalog-service", metrics),
        }
    }
}

#[async_trait]
impl ProductServiceTrait for ProductCatalogService {
    async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "list_products",
            vec![KeyValue::new("component", "product")],
        );

        match self.query.find_all().await {
            Ok(products) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Products retrieved");
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to list products");
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn get_product(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracer.start(
            "get_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        let product = match self.query.find_by_id(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                return Err(ServiceError::NotFound(format!("Product {id} not found")));
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to fetch product");
                return Err(ServiceError::Repo(e));
            }
        };

        self.tracer
            .complete_success(&tracing_ctx, method, "Product retrieved");
        Ok(ProductResponse::from(product))
    }

    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError> {
        let method = Method::Put;
        info!("✏️ Updating product {id}: {req:?}");

        let tracing_ctx = self.tracer.start(
            "update_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id.to_string()),
            ],
        );

        match self.command.update_product(id, req).await {
            Ok(product) => {
                self.tracer
                    .complete_success(&tracing_ctx, method, "Product updated");
                Ok(ProductResponse::from(product))
            }
            Err(RepositoryError::NotFound) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Product not found");
                Err(ServiceError::NotFound(format!("Product {id} not found")))
            }
            Err(e) => {
                self.tracer
                    .complete_error(&tracing_ctx, method, "Failed to update product");
                Err(ServiceError::Repo(e))
            }
        }
    }

    async fn seed_defaults(&self) -> Result<u64, ServiceError> {
        let inserted = self.command.seed_products(DEFAULT_CATALOG).await?;
        info!(
            "🌱 Catalogue seeded: {inserted} of {} default products inserted",
            DEFAULT_CATALOG.len()
        );
        Ok(inserted)
    }
}
