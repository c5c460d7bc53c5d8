pub mod admin;
pub mod validate;
