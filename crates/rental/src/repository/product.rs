use crate::{
    abstract_trait::product::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
    domain::requests::product::UpdateProductRequest,
    model::product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

const PRODUCT_COLUMNS: &str = "product_id, name, description, category, total_stock, \
     co2_saved, water_saved, created_at, updated_at";

#[derive(Clone)]
pub struct ProductRepository {
    db: ConnectionPool,
}

impl ProductRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY product_id");

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("✅ Retrieved {} products", products.len());
        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = $1");

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ANY($1) ORDER BY product_id"
        );

        sqlx::query_as::<_, ProductModel>(&sql)
            .bind(ids)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products {ids:?}: {e:?}");
                RepositoryError::from(e)
            })
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductRepository {
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE products
            SET total_stock = COALESCE($2, total_stock),
                co2_saved   = COALESCE($3, co2_saved),
                water_saved = COALESCE($4, water_saved),
                updated_at  = CURRENT_TIMESTAMP
            WHERE product_id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let product = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(id)
            .bind(req.total_stock)
            .bind(req.co2_saved)
            .bind(req.water_saved)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update product {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        info!("🔄 Updated product {id}");
        Ok(product)
    }

    async fn seed_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;
        let mut inserted = 0;

        for product in products {
            let result = sqlx::query(
                r#"
                INSERT INTO products (name, description, category, total_stock, co2_saved, water_saved)
                VALUES ($1, $2, $3, $4, $5, $6)
                ON CONFLICT (name) DO NOTHING
                "#,
            )
            .bind(product.name)
            .bind(product.description)
            .bind(product.category.as_str())
            .bind(product.total_stock)
            .bind(product.co2_saved)
            .bind(product.water_saved)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("❌ Failed to seed product {}: {e:?}", product.name);
                RepositoryError::from(e)
            })?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(RepositoryError::from)?;

        Ok(inserted)
    }
}
