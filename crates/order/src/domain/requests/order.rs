use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineRequest {
    #[schema(example = 1)]
    pub product_id: i32,

    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PlaceOrderRequest {
    #[validate(length(min = 1, message = "order must contain at least one product"))]
    pub products: Vec<OrderLineRequest>,

    #[schema(example = "Jane Doe, 1 Main St")]
    pub customer_info: String,
}

/// Rows to write for one order, already carrying the generated id.
#[derive(Debug, Clone)]
pub struct CreateOrderRecordRequest {
    pub order_id: String,
    pub lines: Vec<OrderLineRequest>,
    pub customer_info: String,
}
