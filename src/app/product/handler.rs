//! 产品处理器

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use super::{model::Product, service::ProductService};
use crate::core::{error::CoreError, extract::JsonObject, response::DeleteResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(product_service: ProductService) -> Self {
        Self { product_service }
    }
}

pub async fn welcome() -> &'static str {
    "Welcome to the Product API! Go to /api/products to see all products."
}

pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    Ok(Json(state.product_service.list_products()?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    Ok(Json(state.product_service.get_product(&id)?))
}

pub async fn create_product(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Product>), CoreError> {
    let product = state.product_service.create_product(&body)?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonObject(patch): JsonObject,
) -> Result<Json<Product>, CoreError> {
    Ok(Json(state.product_service.update_product(&id, patch)?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse<Product>>, CoreError> {
    let removed = state.product_service.delete_product(&id)?;
    Ok(Json(DeleteResponse::new("Product deleted", vec![removed])))
}

/// 未匹配任何路由
pub async fn route_not_found() -> CoreError {
    CoreError::NotFound("Route not found".to_string())
}
