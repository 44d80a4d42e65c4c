use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One line of an order; rows sharing `order_id` form the order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_id: String,
    pub product_id: i32,
    pub quantity: i32,
    pub customer_info: String,
    pub created_at: NaiveDateTime,
}
