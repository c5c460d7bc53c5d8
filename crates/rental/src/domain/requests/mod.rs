pub mod inventory;
pub mod pricing;
pub mod product;
pub mod rental;
