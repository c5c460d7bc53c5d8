pub mod impact;
pub mod inventory_date;
pub mod product;
pub mod rental;
pub mod rental_item;
