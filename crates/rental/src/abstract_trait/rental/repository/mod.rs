mod command;
mod query;

pub use self::command::{DynRentalCommandRepository, NewReservation, RentalCommandRepositoryTrait};
pub use self::query::{DynRentalQueryRepository, RentalQueryRepositoryTrait};
