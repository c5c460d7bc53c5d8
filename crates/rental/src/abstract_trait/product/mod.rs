use crate::{
    domain::{requests::product::UpdateProductRequest, response::product::ProductResponse},
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::{RepositoryError, ServiceError};
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;
pub type DynProductService = Arc<dyn ProductServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError>;
    /// Inserts each product whose name is not yet taken; returns how many were inserted.
    async fn seed_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait ProductServiceTrait {
    async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError>;
    async fn get_product(&self, id: i32) -> Result<ProductResponse, ServiceError>;
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductResponse, ServiceError>;
    async fn seed_defaults(&self) -> Result<u64, ServiceError>;
}
