mod database;
mod kafka;
mod memory;
mod queue;
mod sqs;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::kafka::{KafkaConfig, KafkaQueue};
pub use self::memory::MemoryQueue;
pub use self::queue::QueueConfig;
pub use self::sqs::{SqsConfig, SqsQueue};
