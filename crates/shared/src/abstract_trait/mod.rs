mod queue;

pub use self::queue::{DynQueue, MAX_RECEIVE_BATCH, QueueTrait};
