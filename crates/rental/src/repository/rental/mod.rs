mod command;
mod query;

pub use self::command::RentalCommandRepository;
pub use self::query::RentalQueryRepository;

pub(crate) const RENTAL_COLUMNS: &str = "rental_id, customer_name, customer_email, phone_number, \
     start_date, end_date, total_amount, status, created_at";
