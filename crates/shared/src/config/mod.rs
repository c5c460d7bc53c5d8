mod database;
mod kafka;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::kafka::Kafka;
