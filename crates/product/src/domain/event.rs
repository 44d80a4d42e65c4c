use serde::{Deserialize, Serialize};

/// Announced on the queue after a catalog write succeeds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum CatalogEvent {
    Create { product_id: i32 },
    Update { product_id: i32 },
    Delete { product_id: i32 },
}

impl CatalogEvent {
    pub fn product_id(&self) -> i32 {
        match self {
            CatalogEvent::Create { product_id }
            | CatalogEvent::Update { product_id }
            | CatalogEvent::Delete { product_id } => *product_id,
        }
    }
}
