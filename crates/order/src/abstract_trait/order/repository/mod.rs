mod command;

pub use self::command::{DynOrderCommandRepository, OrderCommandRepositoryTrait};
