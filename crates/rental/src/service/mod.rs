mod availability;
mod catalog;
mod pricing;
mod rental_command;
mod rental_query;

pub use self::availability::AvailabilityService;
pub use self::catalog::{DEFAULT_CATALOG, ProductCatalogService};
pub use self::pricing::{BULK_FEE, BULK_THRESHOLD, PricingService, STANDARD_FEE, price_cart};
pub use self::rental_command::{RentalCommandService, RentalCommandServiceDeps};
pub use self::rental_query::RentalQueryService;
