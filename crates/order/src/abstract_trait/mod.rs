pub mod generator;
pub mod order;
