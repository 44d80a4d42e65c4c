use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum OrderEvent {
    PlaceOrder { order_id: String },
}
