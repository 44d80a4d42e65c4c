use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PlaceOrderResponse {
    #[schema(example = "0b7e3c1a-5d0f-4c7e-9a51-4f1f9c0d2e11")]
    pub order_id: String,

    #[schema(example = 2)]
    pub line_count: usize,
}
