mod command;

pub use self::command::{DynOrderCommandService, OrderCommandServiceTrait};
