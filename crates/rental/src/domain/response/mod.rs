pub mod api;
pub mod impact;
pub mod inventory;
pub mod pagination;
pub mod pricing;
pub mod product;
pub mod rental;
