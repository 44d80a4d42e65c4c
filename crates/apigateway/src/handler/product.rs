use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Json,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use product::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    domain::{
        requests::product::{CreateProductRequest, DeleteProductQuery, UpdateProductRequest},
        response::product::ProductResponse,
    },
};
use shared::errors::HttpError;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/",
    tag = "Product",
    responses(
        (status = 200, description = "Whole catalog ordered by id", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let products = service.find_all().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/admin",
    tag = "Product",
    responses(
        (status = 200, description = "Whole catalog ordered by id", body = Vec<ProductResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_admin_products(
    service: Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    get_products(service).await
}

#[utoipa::path(
    post,
    path = "/admin/create",
    tag = "Product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let product = service.create_product(&body).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/admin/update",
    tag = "Product",
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated, or no product with that id"),
        (status = 400, description = "Malformed body"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    service.update_product(&body).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/admin/delete",
    tag = "Product",
    params(DeleteProductQuery),
    responses(
        (status = 204, description = "Product deleted, or no product with that id"),
        (status = 400, description = "Missing or invalid id"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    query: Result<Query<DeleteProductQuery>, QueryRejection>,
) -> Result<impl IntoResponse, HttpError> {
    let id = match query {
        Ok(Query(DeleteProductQuery { id: Some(id) })) => id,
        Ok(_) => return Err(HttpError::BadRequest("Missing id parameter".into())),
        Err(rejection) => {
            return Err(HttpError::BadRequest(format!(
                "Invalid id parameter: {}",
                rejection.body_text()
            )));
        }
    };

    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/", get(get_products))
        .route("/admin", get(get_admin_products))
        .route("/admin/create", post(create_product))
        .route("/admin/update", put(update_product))
        .route("/admin/delete", delete(delete_product))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
}
