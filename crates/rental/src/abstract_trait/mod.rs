pub mod inventory;
pub mod notifier;
pub mod pricing;
pub mod product;
pub mod rental;
