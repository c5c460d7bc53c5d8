pub mod cart;
pub mod date_range;
pub mod event;
pub mod ledger;
pub mod requests;
pub mod response;
