mod queue;

pub use self::queue::QueueMessage;
