mod command;
mod query;

pub use self::command::{DynRentalCommandService, RentalCommandServiceTrait};
pub use self::query::{DynRentalQueryService, RentalQueryServiceTrait};
