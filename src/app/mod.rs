//! 应用层: 路由装配

pub mod product;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::{
    auth_middleware, handle_panic, request_logging_middleware, BearerToken,
};
use crate::infrastructure::config::AppConfig;
use product::handler::{self, AppState};

/// 构建完整路由
///
/// 列表与详情公开访问；创建、更新、删除需要 `Authorization: Bearer <token>`。
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let token = BearerToken::new(&config.auth_token);

    let public = Router::new()
        .route("/", get(handler::welcome))
        .route("/api/products", get(handler::list_products))
        .route("/api/products/:id", get(handler::get_product));

    let protected = Router::new()
        .route("/api/products", post(handler::create_product))
        .route(
            "/api/products/:id",
            put(handler::update_product).delete(handler::delete_product),
        )
        .route_layer(middleware::from_fn_with_state(token, auth_middleware));

    public
        .merge(protected)
        .fallback(handler::route_not_found)
        // 第一层在最外侧
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
