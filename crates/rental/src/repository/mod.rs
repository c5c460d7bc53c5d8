mod inventory;
mod memory;
mod product;
mod rental;

pub use self::inventory::InventoryRepository;
pub use self::memory::MemoryStore;
pub use self::product::ProductRepository;
pub use self::rental::{RentalCommandRepository, RentalQueryRepository};
