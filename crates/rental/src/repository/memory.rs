use crate::{
    abstract_trait::{
        inventory::InventoryRepositoryTrait,
        product::{ProductCommandRepositoryTrait, ProductQueryRepositoryTrait},
        rental::repository::{
            NewReservation, RentalCommandRepositoryTrait, RentalQueryRepositoryTrait,
        },
    },
    domain::{
        date_range::DateRange,
        ledger::LedgerView,
        requests::{product::UpdateProductRequest, rental::FindAllRentals},
    },
    model::{
        impact::RentalImpact,
        inventory_date::InventoryDate,
        product::{NewProduct, Product as ProductModel},
        rental::{Rental as RentalModel, RentalStatus},
        rental_item::RentalItem as RentalItemModel,
    },
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use shared::errors::RepositoryError;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct MemoryState {
    products: BTreeMap<i32, ProductModel>,
    ledger: HashMap<(NaiveDate, i32), i32>,
    rentals: BTreeMap<i32, RentalModel>,
    items: Vec<RentalItemModel>,
    next_product_id: i32,
    next_rental_id: i32,
    next_item_id: i32,
}

impl MemoryState {
    fn ledger_view(&self, product: &ProductModel, range: &DateRange) -> LedgerView {
        let overrides = range.days().filter_map(|day| {
            self.ledger
                .get(&(day, product.product_id))
                .map(|stock| (day, *stock))
        });
        LedgerView::new(product.total_stock, overrides)
    }
}

/// Process-local storage backend. Every operation runs under one lock, so a
/// reservation's check and decrement are atomic within this process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for MemoryStore {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<ProductModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .products
            .values()
            .filter(|p| ids.contains(&p.product_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for MemoryStore {
    async fn update_product(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ProductModel, RepositoryError> {
        let mut state = self.state.lock().await;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;

        if let Some(total_stock) = req.total_stock {
            product.total_stock = total_stock;
        }
        if let Some(co2_saved) = req.co2_saved {
            product.co2_saved = co2_saved;
        }
        if let Some(water_saved) = req.water_saved {
            product.water_saved = water_saved;
        }
        product.updated_at = Some(Utc::now().naive_utc());

        Ok(product.clone())
    }

    async fn seed_products(&self, products: &[NewProduct]) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().await;
        let mut inserted = 0;

        for product in products {
            if state.products.values().any(|p| p.name == product.name) {
                continue;
            }

            state.next_product_id += 1;
            let id = state.next_product_id;
            let now = Utc::now().naive_utc();

            state.products.insert(
                id,
                ProductModel {
                    product_id: id,
                    name: product.name.to_string(),
                    description: product.description.to_string(),
                    category: product.category,
                    total_stock: product.total_stock,
                    co2_saved: product.co2_saved,
                    water_saved: product.water_saved,
                    created_at: Some(now),
                    updated_at: Some(now),
                },
            );
            inserted += 1;
        }

        Ok(inserted)
    }
}

#[async_trait]
impl InventoryRepositoryTrait for MemoryStore {
    async fn find_in_range(
        &self,
        product_id: Option<i32>,
        range: &DateRange,
    ) -> Result<Vec<InventoryDate>, RepositoryError> {
        let state = self.state.lock().await;

        let mut rows: Vec<InventoryDate> = state
            .ledger
            .iter()
            .filter(|((date, pid), _)| {
                range.contains(*date) && product_id.is_none_or(|wanted| wanted == *pid)
            })
            .map(|((date, pid), stock)| InventoryDate {
                date: *date,
                product_id: *pid,
                available_stock: *stock,
            })
            .collect();

        rows.sort_by_key(|row| (row.date, row.product_id));
        Ok(rows)
    }
}

#[async_trait]
impl RentalCommandRepositoryTrait for MemoryStore {
    async fn reserve(
        &self,
        req: &NewReservation,
    ) -> Result<(RentalModel, Vec<RentalItemModel>), RepositoryError> {
        let mut state = self.state.lock().await;

        let mut stock_by_line = Vec::with_capacity(req.lines.len());
        for line in &req.lines {
            let product = state
                .products
                .get(&line.product_id)
                .ok_or(RepositoryError::NotFound)?;
            let available = state.ledger_view(product, &req.range).min_across(&req.range);

            if line.quantity > available {
                warn!(
                    "🚫 Product {} short: requested={}, available={available}",
                    line.product_id, line.quantity
                );
                return Err(RepositoryError::InsufficientStock {
                    product_id: line.product_id,
                    requested: line.quantity,
                    available,
                });
            }

            stock_by_line.push((line, product.total_stock));
        }

        state.next_rental_id += 1;
        let rental = RentalModel {
            rental_id: state.next_rental_id,
            customer_name: req.customer_name.clone(),
            customer_email: req.customer_email.clone(),
            phone_number: req.phone_number.clone(),
            start_date: req.range.start(),
            end_date: req.range.end(),
            total_amount: req.total_amount,
            status: RentalStatus::Pending,
            created_at: Utc::now().naive_utc(),
        };
        state.rentals.insert(rental.rental_id, rental.clone());

        let mut items = Vec::with_capacity(stock_by_line.len());
        for (line, total_stock) in stock_by_line {
            state.next_item_id += 1;
            let item = RentalItemModel {
                rental_item_id: state.next_item_id,
                rental_id: rental.rental_id,
                product_id: line.product_id,
                quantity: line.quantity,
            };
            state.items.push(item.clone());
            items.push(item);

            for day in req.range.days() {
                *state
                    .ledger
                    .entry((day, line.product_id))
                    .or_insert(total_stock) -= line.quantity;
            }
        }

        info!(
            "✅ Reserved rental {} in memory ({} lines)",
            rental.rental_id,
            items.len()
        );

        Ok((rental, items))
    }

    async fn update_status(
        &self,
        rental_id: i32,
        status: RentalStatus,
    ) -> Result<RentalModel, RepositoryError> {
        let mut state = self.state.lock().await;

        let current = state
            .rentals
            .get(&rental_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)?;

        if !current.status.can_transition_to(status) {
            return Err(RepositoryError::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        if status == RentalStatus::Cancelled {
            let range = DateRange::new(current.start_date, current.end_date)
                .map_err(|e| RepositoryError::Custom(e.to_string()))?;
            let restored: Vec<(i32, i32)> = state
                .items
                .iter()
                .filter(|item| item.rental_id == rental_id)
                .map(|item| (item.product_id, item.quantity))
                .collect();

            for (product_id, quantity) in restored {
                for day in range.days() {
                    if let Some(stock) = state.ledger.get_mut(&(day, product_id)) {
                        *stock += quantity;
                    }
                }
            }
        }

        let rental = state
            .rentals
            .get_mut(&rental_id)
            .ok_or(RepositoryError::NotFound)?;
        rental.status = status;

        Ok(rental.clone())
    }
}

#[async_trait]
impl RentalQueryRepositoryTrait for MemoryStore {
    async fn find_all(
        &self,
        req: &FindAllRentals,
    ) -> Result<(Vec<RentalModel>, i64), RepositoryError> {
        let state = self.state.lock().await;

        let matching: Vec<&RentalModel> = state
            .rentals
            .values()
            .rev()
            .filter(|r| req.status.is_none_or(|s| s == r.status))
            .collect();

        let total = matching.len() as i64;
        let page_size = i64::from(req.page_size.max(0));
        let offset = (i64::from(req.page) - 1).max(0).saturating_mul(page_size);
        let rentals = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok((rentals, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<RentalModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state.rentals.get(&id).cloned())
    }

    async fn find_recent(&self, limit: i64) -> Result<Vec<RentalModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .rentals
            .values()
            .rev()
            .take(usize::try_from(limit.max(0)).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_items_by_rentals(
        &self,
        rental_ids: &[i32],
    ) -> Result<Vec<RentalItemModel>, RepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .items
            .iter()
            .filter(|item| rental_ids.contains(&item.rental_id))
            .cloned()
            .collect())
    }

    async fn impact(&self) -> Result<RentalImpact, RepositoryError> {
        let state = self.state.lock().await;

        let active: HashSet<i32> = state
            .rentals
            .values()
            .filter(|r| r.status != RentalStatus::Cancelled)
            .map(|r| r.rental_id)
            .collect();

        let mut impact = RentalImpact::default();
        let mut counted = HashSet::new();

        for item in state.items.iter().filter(|i| active.contains(&i.rental_id)) {
            let Some(product) = state.products.get(&item.product_id) else {
                continue;
            };
            let quantity = item.quantity as f64;
            impact.total_co2_saved += quantity * product.co2_saved;
            impact.total_water_saved += quantity * product.water_saved;
            impact.items_rented += item.quantity as i64;
            counted.insert(item.rental_id);
        }
        impact.rental_count = counted.len() as i64;

        Ok(impact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartLine;
    use crate::model::product::ProductCategory;
    use rust_decimal::Decimal;
    use std::time::Duration;

    const CUPS: NewProduct = NewProduct {
        name: "Cup",
        description: "",
        category: ProductCategory::Glasses,
        total_stock: 10,
        co2_saved: 0.1,
        water_saved: 0.5,
    };

    async fn store_with_rental() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed_products(&[CUPS]).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        store
            .reserve(&NewReservation {
                customer_name: "Ada".into(),
                customer_email: "ada@example.com".into(),
                phone_number: None,
                range: DateRange::single(day),
                lines: vec![CartLine {
                    product_id: 1,
                    quantity: 2,
                }],
                total_amount: Decimal::from(15),
                lock_timeout: Duration::from_secs(1),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn page_far_past_the_end_is_empty() {
        let store = store_with_rental().await;

        let (rentals, total) = RentalQueryRepositoryTrait::find_all(
            &store,
            &FindAllRentals {
                page: i32::MAX,
                page_size: 100,
                status: None,
            },
        )
        .await
        .unwrap();

        assert!(rentals.is_empty());
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn negative_page_reads_as_the_first() {
        let store = store_with_rental().await;

        let (rentals, _) = RentalQueryRepositoryTrait::find_all(
            &store,
            &FindAllRentals {
                page: i32::MIN,
                page_size: i32::MAX,
                status: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(rentals.len(), 1);
    }

    #[tokio::test]
    async fn recent_with_huge_limit_returns_everything() {
        let store = store_with_rental().await;
        assert_eq!(store.find_recent(i64::MAX).await.unwrap().len(), 1);
    }
}
