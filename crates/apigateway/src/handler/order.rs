use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use order::{
    abstract_trait::order::service::DynOrderCommandService,
    domain::{requests::order::PlaceOrderRequest, response::order::PlaceOrderResponse},
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/order",
    tag = "Order",
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Malformed body or no products"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn place_order(
    Extension(service): Extension<DynOrderCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<PlaceOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.place_order(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/order", post(place_order))
        .layer(Extension(app_state.di_container.order_command.clone()))
}
