use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Desk lamp")]
    pub name: String,

    #[schema(example = "Adjustable LED lamp")]
    pub description: String,

    /// Free-form decimal text, stored as given.
    #[schema(example = "24.99")]
    pub price: String,

    #[schema(example = "lighting")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Desk lamp")]
    pub name: String,

    #[schema(example = "Adjustable LED lamp")]
    pub description: String,

    #[schema(example = "19.99")]
    pub price: String,

    #[schema(example = "lighting")]
    pub category: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteProductQuery {
    /// Product to remove.
    pub id: Option<i32>,
}
